//! Integration tests for overlay shapes and placement helpers
use std::rc::Rc;

use rust_skyplot::overlay::{
    add_catalog, add_fill_background, add_legend_for_catalog, add_path_annotations, add_polyline,
    add_scale_bar, add_text, set_color_map, CatalogHandle, CatalogOptions, CompositeOperation,
    DrawingContext, GraphicOverlay, LegendOptions, OverlayDefaults, OverlayHandle, OverlayShape,
    PolylineOptions, Rectangle, ScaleBarOptions, SkyViewer, SourceShape, Text, TextAlign,
    TextBaseline, TextOptions,
};
use rust_skyplot::{get_path_annotations, Coordinate, PathStyle};

/// Viewer with a linear pixel-to-sky mapping: 1 pixel = `deg_per_pix` degrees
struct MockViewer {
    size: [f64; 2],
    fov: [f64; 2],
    deg_per_pix: f64,
    overlays: Vec<OverlayHandle>,
    catalogs: Vec<CatalogHandle>,
    color_map: Option<String>,
}

impl MockViewer {
    fn new() -> Self {
        MockViewer {
            size: [800.0, 600.0],
            fov: [0.4, 0.3],
            deg_per_pix: 0.0005,
            overlays: Vec::new(),
            catalogs: Vec::new(),
            color_map: None,
        }
    }
}

impl SkyViewer for MockViewer {
    fn add_overlay(&mut self, layer: OverlayHandle) {
        self.overlays.push(layer);
    }

    fn add_catalog(&mut self, catalog: CatalogHandle) {
        self.catalogs.push(catalog);
    }

    fn get_size(&self) -> [f64; 2] {
        self.size
    }

    fn get_fov(&self) -> [f64; 2] {
        self.fov
    }

    fn pix2world(&self, x: f64, y: f64) -> Coordinate {
        Coordinate::new(x * self.deg_per_pix, -y * self.deg_per_pix)
    }

    fn update_color_map(&mut self, color_map: &str) {
        self.color_map = Some(color_map.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    FillStyle(String),
    Font(String),
    Align(TextAlign),
    Baseline(TextBaseline),
    FillText(String, f64, f64),
    Composite(CompositeOperation),
    FillRect(f64, f64, f64, f64),
}

struct RecordingContext {
    composite: CompositeOperation,
    calls: Vec<Call>,
}

impl RecordingContext {
    fn new() -> Self {
        RecordingContext {
            composite: CompositeOperation::SourceOver,
            calls: Vec::new(),
        }
    }
}

impl DrawingContext for RecordingContext {
    fn set_fill_style(&mut self, color: &str) {
        self.calls.push(Call::FillStyle(color.to_string()));
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(Call::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.calls.push(Call::Align(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.calls.push(Call::Baseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(Call::FillText(text.to_string(), x, y));
    }

    fn global_composite_operation(&self) -> CompositeOperation {
        self.composite
    }

    fn set_global_composite_operation(&mut self, op: CompositeOperation) {
        self.composite = op;
        self.calls.push(Call::Composite(op));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::FillRect(x, y, width, height));
    }
}

fn only_text(layer: &OverlayHandle) -> Text {
    let layer = layer.borrow();
    let shapes: Vec<&dyn OverlayShape> = layer.shapes().collect();
    assert_eq!(shapes.len(), 1);
    let text = shapes[0]
        .as_any()
        .downcast_ref::<Text>()
        .expect("text shape")
        .clone();
    text
}

#[test]
fn test_text_defaults_and_draw() {
    let text = Text::new(20.0, 30.0, "Something interesting").with_color("red");
    assert_eq!(text.align, TextAlign::Center);
    assert_eq!(text.baseline, TextBaseline::Alphabetic);

    let mut ctx = RecordingContext::new();
    text.draw(&mut ctx);
    assert_eq!(
        ctx.calls,
        vec![
            Call::FillStyle("red".to_string()),
            Call::Font("15px Arial".to_string()),
            Call::Align(TextAlign::Center),
            Call::Baseline(TextBaseline::Alphabetic),
            Call::FillText("Something interesting".to_string(), 20.0, 30.0),
        ]
    );
}

#[test]
fn test_rectangle_restores_composite_mode() {
    let rect = Rectangle::new(0.0, 0.0, 10.0, 20.0).with_color("blue");
    assert_eq!(rect.composite, CompositeOperation::DestinationOver);

    let mut ctx = RecordingContext::new();
    rect.draw(&mut ctx);
    assert_eq!(ctx.composite, CompositeOperation::SourceOver);
    assert_eq!(
        ctx.calls,
        vec![
            Call::Composite(CompositeOperation::DestinationOver),
            Call::FillStyle("blue".to_string()),
            Call::FillRect(0.0, 0.0, 10.0, 20.0),
            Call::Composite(CompositeOperation::SourceOver),
        ]
    );
}

#[test]
fn test_rectangle_fills_between_corners() {
    let rect = Rectangle::new(10.0, 20.0, 30.0, 50.0);
    let mut ctx = RecordingContext::new();
    rect.draw(&mut ctx);
    assert!(ctx.calls.contains(&Call::FillRect(10.0, 20.0, 20.0, 30.0)));
}

#[test]
fn test_shape_back_reference_is_weak() {
    let layer = GraphicOverlay::new().into_handle();
    GraphicOverlay::add(&layer, Text::new(1.0, 2.0, "label"));
    let text = only_text(&layer);
    let owner = text.overlay().expect("layer alive");
    assert!(Rc::ptr_eq(&owner, &layer));
    drop(owner);
    assert_eq!(Rc::strong_count(&layer), 1);
    drop(layer);
    assert!(text.overlay().is_none());
}

#[test]
fn test_add_text_uses_placement_defaults() {
    let mut viewer = MockViewer::new();
    add_text(
        &mut viewer,
        5.0,
        6.0,
        &TextOptions {
            label: Some("M31".to_string()),
            ..Default::default()
        },
        &OverlayDefaults::default(),
    );
    assert_eq!(viewer.overlays.len(), 1);
    let text = only_text(&viewer.overlays[0]);
    assert_eq!(text.text, "M31");
    assert_eq!(text.color.as_deref(), Some("white"));
    assert_eq!(text.align, TextAlign::Start);
    assert_eq!(text.baseline, TextBaseline::Middle);
}

#[test]
fn test_add_polyline_defaults() {
    let mut viewer = MockViewer::new();
    let coords = [Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)];
    add_polyline(&mut viewer, &coords, &PolylineOptions::default(), &OverlayDefaults::default());
    let layer = viewer.overlays[0].borrow();
    let polylines: Vec<_> = layer.polylines().collect();
    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].points, coords.to_vec());
    assert_eq!(polylines[0].color, "red");
    assert_eq!(polylines[0].line_width, 2.0);
}

#[test]
fn test_scale_bar_geometry() {
    let mut viewer = MockViewer::new();
    let options = ScaleBarOptions {
        label: "1'".to_string(),
        color: Some("yellow".to_string()),
        offset_bottom: Some(20.0),
        offset_left: Some(10.0),
        ..Default::default()
    };
    add_scale_bar(&mut viewer, 0.1, &options, &OverlayDefaults::default());

    assert_eq!(viewer.overlays.len(), 1);
    let layer = viewer.overlays[0].borrow();
    assert_eq!(layer.name.as_deref(), Some("scale bar"));
    assert_eq!(layer.line_width, Some(4.0));

    // 0.1 deg of a 0.4 deg wide, 800 px view is 200 px
    let bar = layer.polylines().next().expect("bar polyline");
    assert_eq!(bar.points[0], viewer.pix2world(10.0, 580.0));
    assert_eq!(bar.points[1], viewer.pix2world(210.0, 580.0));
    assert_eq!(bar.color, "yellow");

    let text = layer.shapes().next().unwrap().as_any().downcast_ref::<Text>().unwrap();
    assert_eq!(text.x, 10.0 + 200.0 + 15.0);
    assert_eq!(text.y, 580.0);
    assert_eq!(text.text, "1'");
    assert_eq!(text.align, TextAlign::Start);
}

#[test]
fn test_legend_places_source_and_label() {
    let mut viewer = MockViewer::new();
    add_legend_for_catalog(
        &mut viewer,
        &LegendOptions {
            label: Some("Targets".to_string()),
            offset_bottom: Some(40.0),
            offset_left: Some(10.0),
            source_size: Some(9.0),
            ..Default::default()
        },
        &OverlayDefaults::default(),
    );
    assert_eq!(viewer.catalogs.len(), 1);
    let catalog = viewer.catalogs[0].borrow();
    assert_eq!(catalog.sources, vec![viewer.pix2world(14.0, 560.0)]);
    assert_eq!(catalog.shape, SourceShape::Circle);

    let text = only_text(&viewer.overlays[0]);
    assert_eq!((text.x, text.y), (29.0, 560.0));
    assert_eq!(text.text, "Targets");
}

#[test]
fn test_catalog_adds_legend_only_when_populated() {
    let mut viewer = MockViewer::new();
    add_catalog(&mut viewer, &[], &CatalogOptions::default(), &OverlayDefaults::default());
    assert_eq!(viewer.catalogs.len(), 1);
    assert!(viewer.overlays.is_empty());

    let mut viewer = MockViewer::new();
    let sources = [Coordinate::new(10.0, 10.0), Coordinate::new(10.1, 10.1)];
    let options = CatalogOptions {
        label: Some("Guide stars".to_string()),
        shape: Some(SourceShape::Square),
        ..Default::default()
    };
    add_catalog(&mut viewer, &sources, &options, &OverlayDefaults::default());
    assert_eq!(viewer.catalogs.len(), 2);
    assert_eq!(viewer.catalogs[0].borrow().sources, sources.to_vec());
    assert_eq!(viewer.catalogs[0].borrow().source_size, 8.0);
    assert_eq!(viewer.catalogs[1].borrow().sources.len(), 1);
    assert_eq!(viewer.catalogs[1].borrow().shape, SourceShape::Square);
    assert_eq!(viewer.catalogs[1].borrow().source_size, 12.0);
    assert_eq!(only_text(&viewer.overlays[0]).text, "Guide stars");
}

#[test]
fn test_fill_background_covers_view_behind_content() {
    let mut viewer = MockViewer::new();
    add_fill_background(&mut viewer, "black");
    let layer = viewer.overlays[0].borrow();
    let rect = layer
        .shapes()
        .next()
        .unwrap()
        .as_any()
        .downcast_ref::<Rectangle>()
        .unwrap();
    assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (0.0, 0.0, 800.0, 600.0));
    assert_eq!(rect.composite, CompositeOperation::DestinationOver);

    let mut ctx = RecordingContext::new();
    layer.draw(&mut ctx);
    assert!(ctx.calls.contains(&Call::FillRect(0.0, 0.0, 800.0, 600.0)));
}

#[test]
fn test_set_color_map() {
    let mut viewer = MockViewer::new();
    set_color_map(&mut viewer, &OverlayDefaults::default());
    assert_eq!(viewer.color_map.as_deref(), Some("grayscale"));
}

#[test]
fn test_path_annotations_share_one_layer() {
    let pointings = [
        Coordinate::new(10.0, 0.0),
        Coordinate::new(10.01, 0.0),
        Coordinate::new(10.01, 0.01),
    ];
    let annotations = get_path_annotations(&pointings, 30.0, None, &PathStyle::default());
    let mut viewer = MockViewer::new();
    let options = PolylineOptions {
        color: Some("cyan".to_string()),
        line_width: Some(1.0),
    };
    add_path_annotations(&mut viewer, &annotations, &options, &OverlayDefaults::default());

    assert_eq!(viewer.overlays.len(), 1);
    let layer = viewer.overlays[0].borrow();
    let polylines: Vec<_> = layer.polylines().collect();
    assert_eq!(polylines.len(), annotations.len());
    for (polyline, annotation) in polylines.iter().zip(&annotations) {
        assert_eq!(polyline.points, annotation.points);
        assert_eq!(polyline.color, "cyan");
    }
}

#[test]
fn test_overlay_defaults_from_partial_json() {
    let defaults = OverlayDefaults::from_json(r#"{"color_map": "native", "legend_source_size": 6.0}"#)
        .expect("valid defaults");
    assert_eq!(defaults.color_map, "native");
    assert_eq!(defaults.legend_source_size, 6.0);
    assert_eq!(defaults.text_color, "white");
}
