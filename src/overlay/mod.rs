//! Overlay primitives for an external sky viewer
//!
//! The viewer itself is opaque: it is reached through [`SkyViewer`] and owns
//! the projection between pixels and sky coordinates. This module provides
//! the layer and catalog containers handed to it, the shapes that paint
//! themselves onto a [`DrawingContext`], and placement helpers that build
//! scale bars, legends and backgrounds.
//!
//! Layers and catalogs are shared with the viewer through `Rc<RefCell<_>>`
//! handles. Shapes keep a `Weak` back-reference to the layer containing them.

pub mod placement;
pub mod shapes;

pub use placement::{
    add_catalog, add_fill_background, add_legend_for_catalog, add_path_annotations, add_polyline,
    add_scale_bar, add_text, set_color_map, CatalogOptions, LegendOptions, OverlayDefaults,
    PolylineOptions, ScaleBarOptions, TextOptions,
};
pub use shapes::{Rectangle, Text};

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::utils::coordinate_math::Coordinate;

pub type OverlayHandle = Rc<RefCell<GraphicOverlay>>;
pub type CatalogHandle = Rc<RefCell<Catalog>>;

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::End => "end",
        }
    }
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Middle,
    #[default]
    Alphabetic,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
        }
    }
}

/// How new paint combines with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeOperation {
    /// Paint over existing content
    #[default]
    SourceOver,
    /// Paint behind existing content
    DestinationOver,
}

impl CompositeOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeOperation::SourceOver => "source-over",
            CompositeOperation::DestinationOver => "destination-over",
        }
    }
}

/// Marker drawn for each catalog source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceShape {
    #[default]
    Circle,
    Square,
    Plus,
    Cross,
    Rhomb,
    Triangle,
}

/// 2D drawing surface in viewer pixel space
///
/// Mirrors the subset of a canvas context the overlay shapes use. Pixel
/// `(0, 0)` is the top-left corner of the view.
pub trait DrawingContext {
    fn set_fill_style(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn global_composite_operation(&self) -> CompositeOperation;
    fn set_global_composite_operation(&mut self, op: CompositeOperation);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// Shape that paints itself when its layer is drawn
pub trait OverlayShape: fmt::Debug {
    fn draw(&self, ctx: &mut dyn DrawingContext);

    /// Record the layer this shape belongs to (non-owning)
    fn set_overlay(&mut self, overlay: Weak<RefCell<GraphicOverlay>>);

    /// The containing layer, if it is still alive
    fn overlay(&self) -> Option<OverlayHandle>;

    /// Downcast support for inspection
    fn as_any(&self) -> &dyn Any;
}

/// Line through sky coordinates, rendered by the viewer's own projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Coordinate>,
    pub color: String,
    pub line_width: f64,
}

#[derive(Debug)]
pub enum OverlayItem {
    Shape(Box<dyn OverlayShape>),
    Polyline(Polyline),
}

/// Graphic overlay layer grouping shapes and polylines
#[derive(Debug, Default)]
pub struct GraphicOverlay {
    pub name: Option<String>,
    pub color: Option<String>,
    pub line_width: Option<f64>,
    items: Vec<OverlayItem>,
}

impl GraphicOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    pub fn into_handle(self) -> OverlayHandle {
        Rc::new(RefCell::new(self))
    }

    /// Add a shape to a shared layer and point the shape back at it
    pub fn add<S: OverlayShape + 'static>(layer: &OverlayHandle, mut shape: S) {
        shape.set_overlay(Rc::downgrade(layer));
        layer
            .borrow_mut()
            .items
            .push(OverlayItem::Shape(Box::new(shape)));
    }

    pub fn add_polyline(layer: &OverlayHandle, polyline: Polyline) {
        layer.borrow_mut().items.push(OverlayItem::Polyline(polyline));
    }

    pub fn items(&self) -> &[OverlayItem] {
        &self.items
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Polyline> {
        self.items.iter().filter_map(|item| match item {
            OverlayItem::Polyline(polyline) => Some(polyline),
            OverlayItem::Shape(_) => None,
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = &dyn OverlayShape> {
        self.items.iter().filter_map(|item| match item {
            OverlayItem::Shape(shape) => Some(&**shape),
            OverlayItem::Polyline(_) => None,
        })
    }

    /// Paint every self-drawing shape in insertion order
    pub fn draw(&self, ctx: &mut dyn DrawingContext) {
        for shape in self.shapes() {
            shape.draw(ctx);
        }
    }
}

/// Point-source catalog displayed by the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub color: String,
    pub source_size: f64,
    pub shape: SourceShape,
    pub sources: Vec<Coordinate>,
}

impl Catalog {
    pub fn new(color: impl Into<String>, source_size: f64, shape: SourceShape) -> Self {
        Catalog {
            color: color.into(),
            source_size,
            shape,
            sources: Vec::new(),
        }
    }

    pub fn into_handle(self) -> CatalogHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn add_source(&mut self, source: Coordinate) {
        self.sources.push(source);
    }
}

/// External sky viewer widget
pub trait SkyViewer {
    fn add_overlay(&mut self, layer: OverlayHandle);
    fn add_catalog(&mut self, catalog: CatalogHandle);
    /// View size in pixels `[width, height]`
    fn get_size(&self) -> [f64; 2];
    /// Field of view in degrees `[width, height]`
    fn get_fov(&self) -> [f64; 2];
    /// Sky coordinate under a view pixel
    fn pix2world(&self, x: f64, y: f64) -> Coordinate;
    /// Switch the base image layer's color map
    fn update_color_map(&mut self, color_map: &str);
}
