//! Marker shapes placed along a pointing path
//!
//! Arrow vertices are built as arcsecond offsets in the tangent plane and
//! applied with `offset_coordinate`, so the RA compression of the direction
//! vector is undone at each vertex's own declination.

use super::style::MarkerScale;
use super::{Annotation, AnnotationKind};
use crate::utils::coordinate_math::{offset_coordinate, rotate_coordinate, Coordinate, Offset};
use crate::utils::vector_math::perpendicular_2d;

/// Three arrow vertices `[left base, tip, right base]` around `center`
///
/// `direction` must be a unit vector.
fn arrow_vertices(center: &Coordinate, direction: &[f64; 2], scale: &MarkerScale) -> [Coordinate; 3] {
    let normal = perpendicular_2d(direction);
    let half_length = scale.length / 2.0;
    let w = scale.half_width;

    let left = Offset::new(
        -direction[0] * half_length + normal[0] * w,
        -direction[1] * half_length + normal[1] * w,
    );
    let tip = Offset::new(direction[0] * half_length, direction[1] * half_length);
    let right = Offset::new(
        -direction[0] * half_length - normal[0] * w,
        -direction[1] * half_length - normal[1] * w,
    );

    [
        offset_coordinate(center, &left),
        offset_coordinate(center, &tip),
        offset_coordinate(center, &right),
    ]
}

/// Closed triangle centred on the first pointing
pub(super) fn start_marker(coord: &Coordinate, direction: &[f64; 2], scale: &MarkerScale) -> Annotation {
    let [left, tip, right] = arrow_vertices(coord, direction, scale);
    Annotation::new(AnnotationKind::StartMarker, vec![left, tip, right, left])
}

/// Open arrowhead pushed forward from an intermediate pointing
pub(super) fn middle_arrow(coord: &Coordinate, direction: &[f64; 2], scale: &MarkerScale) -> Annotation {
    let shift = Offset::new(
        direction[0] * scale.middle_shift,
        direction[1] * scale.middle_shift,
    );
    let center = offset_coordinate(coord, &shift);
    let [left, tip, right] = arrow_vertices(&center, direction, scale);
    Annotation::new(AnnotationKind::Arrow, vec![left, tip, right])
}

/// Five-point X: `+RA arm, -RA arm, center, +Dec arm, -Dec arm`
///
/// Arms are rotated about `origin`; the center point is left untouched.
pub(super) fn end_marker(
    coord: &Coordinate,
    origin: &Coordinate,
    scale: &MarkerScale,
    rotation_deg: f64,
) -> Annotation {
    let arm = scale.end_arm;
    let arm_at = |offset: Offset| rotate_coordinate(&offset_coordinate(coord, &offset), rotation_deg, origin);

    Annotation::new(
        AnnotationKind::EndMarker,
        vec![
            arm_at(Offset::new(arm, 0.0)),
            arm_at(Offset::new(-arm, 0.0)),
            *coord,
            arm_at(Offset::new(0.0, arm)),
            arm_at(Offset::new(0.0, -arm)),
        ],
    )
}
