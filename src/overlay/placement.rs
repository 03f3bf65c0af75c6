/// Placement helpers that add overlay layers and catalogs to a sky viewer
///
/// Every helper creates its own layer (or catalog), registers it with the
/// viewer first and then fills it. Pixel positions are measured from the
/// top-left corner of the view; legends and the scale bar are anchored to
/// the bottom-left corner.
use log::trace;
use serde::{Deserialize, Serialize};

use super::shapes::{Rectangle, Text};
use super::{
    Catalog, CompositeOperation, GraphicOverlay, Polyline, SkyViewer, SourceShape, TextAlign,
    TextBaseline,
};
use crate::annotations::Annotation;
use crate::utils::config::LEGEND_TEXT_SPACING_LEFT;
use crate::utils::coordinate_math::Coordinate;

/// Defaults shared by all placement helpers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayDefaults {
    /// Color for pointing patterns and the scale bar
    pub pattern_color: String,
    pub text_color: String,
    pub polyline_color: String,
    pub catalog_color: String,
    pub line_width: f64,
    /// Line width of the scale bar layer itself
    pub scale_bar_layer_line_width: f64,
    /// Gap in pixels between the scale bar and its label
    pub text_spacing: f64,
    /// Distance of catalog legends from the bottom edge
    pub legend_offset_bottom: f64,
    /// Distance of the scale bar from the bottom edge
    pub legend_items_offset_bottom: f64,
    /// Distance of legend items and the scale bar from the left edge
    pub legend_items_offset_left: f64,
    pub legend_source_size: f64,
    pub pattern_source_size: f64,
    pub source_shape: SourceShape,
    pub color_map: String,
}

impl Default for OverlayDefaults {
    fn default() -> Self {
        OverlayDefaults {
            pattern_color: "#ff4500".to_string(),
            text_color: "white".to_string(),
            polyline_color: "red".to_string(),
            catalog_color: "red".to_string(),
            line_width: 2.0,
            scale_bar_layer_line_width: 4.0,
            text_spacing: 15.0,
            legend_offset_bottom: 45.0,
            legend_items_offset_bottom: 20.0,
            legend_items_offset_left: 20.0,
            legend_source_size: 12.0,
            pattern_source_size: 8.0,
            source_shape: SourceShape::Circle,
            color_map: "grayscale".to_string(),
        }
    }
}

impl OverlayDefaults {
    pub fn from_json(json: &str) -> crate::error::AnnotationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    pub label: Option<String>,
    pub color: Option<String>,
    pub align: Option<TextAlign>,
    pub baseline: Option<TextBaseline>,
}

#[derive(Debug, Clone, Default)]
pub struct PolylineOptions {
    pub color: Option<String>,
    pub line_width: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ScaleBarOptions {
    pub label: String,
    pub color: Option<String>,
    pub line_width: Option<f64>,
    pub text_spacing: Option<f64>,
    pub offset_bottom: Option<f64>,
    pub offset_left: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LegendOptions {
    pub label: Option<String>,
    pub color: Option<String>,
    pub offset_bottom: Option<f64>,
    pub offset_left: Option<f64>,
    pub source_size: Option<f64>,
    pub shape: Option<SourceShape>,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub label: Option<String>,
    pub color: Option<String>,
    pub offset_bottom: Option<f64>,
    pub offset_left: Option<f64>,
    pub shape: Option<SourceShape>,
    pub source_size: Option<f64>,
    pub legend_source_size: Option<f64>,
}

/// Add a text label at a pixel position in its own layer
pub fn add_text<V: SkyViewer + ?Sized>(
    viewer: &mut V,
    x: f64,
    y: f64,
    options: &TextOptions,
    defaults: &OverlayDefaults,
) {
    let layer = GraphicOverlay::new().into_handle();
    viewer.add_overlay(layer.clone());
    let text = Text::new(x, y, options.label.clone().unwrap_or_default())
        .with_color(options.color.as_deref().unwrap_or(&defaults.text_color))
        .with_align(options.align.unwrap_or(TextAlign::Start))
        .with_baseline(options.baseline.unwrap_or(TextBaseline::Middle));
    trace!("Adding text '{}' at ({x}, {y})", text.text);
    GraphicOverlay::add(&layer, text);
}

/// Add a polyline through sky coordinates in its own layer
pub fn add_polyline<V: SkyViewer + ?Sized>(
    viewer: &mut V,
    coordinates: &[Coordinate],
    options: &PolylineOptions,
    defaults: &OverlayDefaults,
) {
    let layer = GraphicOverlay::new().into_handle();
    viewer.add_overlay(layer.clone());
    GraphicOverlay::add_polyline(&layer, resolve_polyline(coordinates.to_vec(), options, defaults));
}

/// Add every annotation of a path as a polyline in one shared layer
pub fn add_path_annotations<V: SkyViewer + ?Sized>(
    viewer: &mut V,
    annotations: &[Annotation],
    options: &PolylineOptions,
    defaults: &OverlayDefaults,
) {
    let layer = GraphicOverlay::new()
        .with_name("pointing path")
        .into_handle();
    viewer.add_overlay(layer.clone());
    trace!("Adding {} path annotations", annotations.len());
    for annotation in annotations {
        GraphicOverlay::add_polyline(
            &layer,
            resolve_polyline(annotation.points.clone(), options, defaults),
        );
    }
}

fn resolve_polyline(
    points: Vec<Coordinate>,
    options: &PolylineOptions,
    defaults: &OverlayDefaults,
) -> Polyline {
    Polyline {
        points,
        color: options
            .color
            .clone()
            .unwrap_or_else(|| defaults.polyline_color.clone()),
        line_width: options.line_width.unwrap_or(defaults.line_width),
    }
}

/// Draw a horizontal scale bar of `size_deg` degrees with a label
///
/// The bar length in pixels follows the viewer's current field of view; its
/// ends are converted to sky coordinates through the viewer.
pub fn add_scale_bar<V: SkyViewer + ?Sized>(
    viewer: &mut V,
    size_deg: f64,
    options: &ScaleBarOptions,
    defaults: &OverlayDefaults,
) {
    let color = options
        .color
        .clone()
        .unwrap_or_else(|| defaults.pattern_color.clone());
    let text_spacing = options.text_spacing.unwrap_or(defaults.text_spacing);
    let line_width = options.line_width.unwrap_or(defaults.line_width);
    let offset_bottom = options
        .offset_bottom
        .unwrap_or(defaults.legend_items_offset_bottom);
    let offset_left = options
        .offset_left
        .unwrap_or(defaults.legend_items_offset_left);

    let layer = GraphicOverlay::new()
        .with_name("scale bar")
        .with_color(color.clone())
        .with_line_width(defaults.scale_bar_layer_line_width)
        .into_handle();
    viewer.add_overlay(layer.clone());

    let view_size = viewer.get_size();
    let start_pix = [offset_left, view_size[1] - offset_bottom];
    let bar_size_pix = (size_deg / viewer.get_fov()[0]) * view_size[0];
    let end_pix = [start_pix[0] + bar_size_pix, start_pix[1]];
    let start = viewer.pix2world(start_pix[0], start_pix[1]);
    let end = viewer.pix2world(end_pix[0], end_pix[1]);
    let bar_length = (end_pix[0] - start_pix[0]).abs();
    trace!("Scale bar of {size_deg} deg spans {bar_length} px");

    GraphicOverlay::add_polyline(
        &layer,
        Polyline {
            points: vec![start, end],
            color: color.clone(),
            line_width,
        },
    );
    GraphicOverlay::add(
        &layer,
        Text::new(
            start_pix[0] + bar_length + text_spacing,
            start_pix[1],
            options.label.clone(),
        )
        .with_color(color)
        .with_align(TextAlign::Start)
        .with_baseline(TextBaseline::Middle),
    );
}

/// Add a single legend source with a label near the bottom-left corner
pub fn add_legend_for_catalog<V: SkyViewer + ?Sized>(
    viewer: &mut V,
    options: &LegendOptions,
    defaults: &OverlayDefaults,
) {
    let offset_bottom = options.offset_bottom.unwrap_or(defaults.legend_offset_bottom);
    let offset_left = options
        .offset_left
        .unwrap_or(defaults.legend_items_offset_left);
    let source_size = options.source_size.unwrap_or(defaults.legend_source_size);
    let color = options
        .color
        .clone()
        .unwrap_or_else(|| defaults.catalog_color.clone());
    let shape = options.shape.unwrap_or(defaults.source_shape);

    let catalog = Catalog::new(color.clone(), source_size, shape).into_handle();
    viewer.add_catalog(catalog.clone());

    let view_size = viewer.get_size();
    let source_pix = [
        offset_left + (source_size / 2.0).floor(),
        view_size[1] - offset_bottom,
    ];
    catalog
        .borrow_mut()
        .add_source(viewer.pix2world(source_pix[0], source_pix[1]));

    let layer = GraphicOverlay::new()
        .with_color(color.clone())
        .with_line_width(defaults.line_width)
        .into_handle();
    viewer.add_overlay(layer.clone());
    GraphicOverlay::add(
        &layer,
        Text::new(
            source_pix[0] + LEGEND_TEXT_SPACING_LEFT,
            source_pix[1],
            options.label.clone().unwrap_or_default(),
        )
        .with_color(color)
        .with_align(TextAlign::Start)
        .with_baseline(TextBaseline::Middle),
    );
}

/// Add a catalog with one source per coordinate, plus a legend when non-empty
pub fn add_catalog<V: SkyViewer + ?Sized>(
    viewer: &mut V,
    coordinates: &[Coordinate],
    options: &CatalogOptions,
    defaults: &OverlayDefaults,
) {
    let color = options
        .color
        .clone()
        .unwrap_or_else(|| defaults.catalog_color.clone());
    let shape = options.shape.unwrap_or(defaults.source_shape);
    let source_size = options.source_size.unwrap_or(defaults.pattern_source_size);

    let catalog = Catalog::new(color.clone(), source_size, shape).into_handle();
    viewer.add_catalog(catalog.clone());
    for coordinate in coordinates {
        catalog.borrow_mut().add_source(*coordinate);
    }
    trace!("Catalog with {} sources added", coordinates.len());

    if !coordinates.is_empty() {
        add_legend_for_catalog(
            viewer,
            &LegendOptions {
                label: options.label.clone(),
                color: Some(color),
                offset_bottom: options.offset_bottom,
                offset_left: options.offset_left,
                source_size: Some(
                    options
                        .legend_source_size
                        .unwrap_or(defaults.legend_source_size),
                ),
                shape: Some(shape),
            },
            defaults,
        );
    }
}

/// Switch the viewer's base image to the configured color map
pub fn set_color_map<V: SkyViewer + ?Sized>(viewer: &mut V, defaults: &OverlayDefaults) {
    viewer.update_color_map(&defaults.color_map);
}

/// Fill the whole view with `color`, behind anything already drawn
pub fn add_fill_background<V: SkyViewer + ?Sized>(viewer: &mut V, color: &str) {
    let layer = GraphicOverlay::new().into_handle();
    viewer.add_overlay(layer.clone());
    let view_size = viewer.get_size();
    GraphicOverlay::add(
        &layer,
        Rectangle::new(0.0, 0.0, view_size[0], view_size[1])
            .with_color(color)
            .with_composite(CompositeOperation::DestinationOver),
    );
}
