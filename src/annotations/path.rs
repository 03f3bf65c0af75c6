//! Pointing path annotation generator
use log::debug;

use super::markers::{end_marker, middle_arrow, start_marker};
use super::style::PathStyle;
use super::{Annotation, AnnotationKind};
use crate::utils::coordinate_math::{offset_coordinate, Coordinate, Offset};
use crate::utils::vector_math::{normalize_vector_2d, tangent_direction};

/// Build the annotations describing an ordered path of pointings
///
/// For every step but the last pointing this emits an arrow (a closed start
/// triangle for the first step, an open arrowhead for later steps when
/// `style.draw_middle_arrows` is set) followed by the segment joining the
/// step's two pointings. The last pointing gets an X marker.
///
/// Consecutive pointings that coincide have no direction; their arrow is
/// skipped and only the zero-length segment is emitted. The start triangle
/// then goes to the first step that does have a direction.
///
/// # Arguments
/// * `pointings` - Ordered pointings in degrees
/// * `size_arcsec` - Scale the marker sizes are derived from
/// * `origin` - Center the end marker arms rotate about (default: last pointing)
/// * `style` - Marker scale table and flags
///
/// # Returns
/// Annotations in drawing order; empty when `pointings` is empty
pub fn get_path_annotations(
    pointings: &[Coordinate],
    size_arcsec: f64,
    origin: Option<&Coordinate>,
    style: &PathStyle,
) -> Vec<Annotation> {
    let Some(last) = pointings.last() else {
        debug!("No pointings supplied, no path annotations generated");
        return Vec::new();
    };

    let scale = style.marker_scale(size_arcsec);
    let mut annotations = Vec::with_capacity(2 * pointings.len() - 1);

    let mut started = false;
    for (index, step) in pointings.windows(2).enumerate() {
        let (coord, next) = (&step[0], &step[1]);

        match normalize_vector_2d(&tangent_direction(coord, next)) {
            Some(direction) if !started => {
                annotations.push(start_marker(coord, &direction, &scale));
                started = true;
            }
            Some(direction) if style.draw_middle_arrows => {
                annotations.push(middle_arrow(coord, &direction, &scale));
            }
            Some(_) => {}
            None => debug!(
                "Pointings {} and {} coincide at ({}, {}), skipping arrow",
                index,
                index + 1,
                coord.ra,
                coord.dec
            ),
        }

        annotations.push(Annotation::new(AnnotationKind::Segment, vec![*coord, *next]));
    }

    annotations.push(end_marker(
        last,
        origin.unwrap_or(last),
        &scale,
        style.end_marker_rotation,
    ));
    annotations
}

/// Build path annotations for a pattern of offsets around a target
///
/// Each offset (arcsec) is rotated by `pattern_rotation_deg` and applied to
/// `center`. The end marker turns with the pattern: its arms are rotated by
/// the style rotation plus `pattern_rotation_deg`, about the last pointing,
/// so the X stays centred on the endpoint.
pub fn get_pointing_path_annotations(
    center: &Coordinate,
    offsets: &[Offset],
    size_arcsec: f64,
    pattern_rotation_deg: f64,
    style: &PathStyle,
) -> Vec<Annotation> {
    let pointings: Vec<Coordinate> = offsets
        .iter()
        .map(|offset| offset_coordinate(center, &offset.rotated(pattern_rotation_deg)))
        .collect();

    let style = style
        .clone()
        .with_end_marker_rotation(style.end_marker_rotation + pattern_rotation_deg);
    get_path_annotations(&pointings, size_arcsec, None, &style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(annotations: &[Annotation]) -> Vec<AnnotationKind> {
        annotations.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_single_pointing_is_end_marker_only() {
        let annotations =
            get_path_annotations(&[Coordinate::new(1.0, 1.0)], 60.0, None, &PathStyle::default());
        assert_eq!(kinds(&annotations), vec![AnnotationKind::EndMarker]);
    }

    #[test]
    fn test_coincident_pointings_skip_arrow() {
        let p = Coordinate::new(20.0, -30.0);
        let annotations = get_path_annotations(&[p, p], 60.0, None, &PathStyle::default());
        assert_eq!(
            kinds(&annotations),
            vec![AnnotationKind::Segment, AnnotationKind::EndMarker]
        );
        assert!(annotations
            .iter()
            .flat_map(|a| a.points.iter())
            .all(|c| c.ra.is_finite() && c.dec.is_finite()));
    }

    #[test]
    fn test_pattern_without_rotation_matches_plain_offsets() {
        let center = Coordinate::new(150.0, 2.0);
        let offsets = [Offset::new(0.0, 0.0), Offset::new(30.0, 0.0)];
        let style = PathStyle::default();
        let from_pattern = get_pointing_path_annotations(&center, &offsets, 60.0, 0.0, &style);
        let pointings: Vec<Coordinate> =
            offsets.iter().map(|o| offset_coordinate(&center, o)).collect();
        assert_eq!(from_pattern, get_path_annotations(&pointings, 60.0, None, &style));
    }
}
