//! Self-drawing overlay shapes

use std::any::Any;
use std::cell::RefCell;
use std::rc::Weak;

use super::{
    CompositeOperation, DrawingContext, GraphicOverlay, OverlayHandle, OverlayShape, TextAlign,
    TextBaseline,
};
use crate::utils::config::OVERLAY_FONT;

/// Text placed at a pixel position
///
/// The viewer's overlay API only accepts shapes, so labels are drawn as a
/// shape inside a layer. They are then part of the viewer's redraw loop and
/// of any image it exports.
#[derive(Debug, Clone)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Option<String>,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    overlay: Weak<RefCell<GraphicOverlay>>,
}

impl Text {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Text {
            x,
            y,
            text: text.into(),
            color: None,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            overlay: Weak::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

impl OverlayShape for Text {
    fn draw(&self, ctx: &mut dyn DrawingContext) {
        if let Some(color) = &self.color {
            ctx.set_fill_style(color);
        }
        ctx.set_font(OVERLAY_FONT);
        ctx.set_text_align(self.align);
        ctx.set_text_baseline(self.baseline);
        ctx.fill_text(&self.text, self.x, self.y);
    }

    fn set_overlay(&mut self, overlay: Weak<RefCell<GraphicOverlay>>) {
        self.overlay = overlay;
    }

    fn overlay(&self) -> Option<OverlayHandle> {
        self.overlay.upgrade()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Filled rectangle between two pixel corners
///
/// `(x2, y2)` is the opposite corner, not a width and height; the filled
/// extent is `(x2 - x1, y2 - y1)`.
#[derive(Debug, Clone)]
pub struct Rectangle {
    /// First corner
    pub x1: f64,
    pub y1: f64,
    /// Opposite corner
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub composite: CompositeOperation,
    overlay: Weak<RefCell<GraphicOverlay>>,
}

impl Rectangle {
    /// Black rectangle painted behind existing content
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Rectangle {
            x1,
            y1,
            x2,
            y2,
            color: "black".to_string(),
            composite: CompositeOperation::DestinationOver,
            overlay: Weak::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_composite(mut self, composite: CompositeOperation) -> Self {
        self.composite = composite;
        self
    }
}

impl OverlayShape for Rectangle {
    /// The surface's composite mode is restored after filling
    fn draw(&self, ctx: &mut dyn DrawingContext) {
        let saved = ctx.global_composite_operation();
        ctx.set_global_composite_operation(self.composite);
        ctx.set_fill_style(&self.color);
        ctx.fill_rect(self.x1, self.y1, self.x2 - self.x1, self.y2 - self.y1);
        ctx.set_global_composite_operation(saved);
    }

    fn set_overlay(&mut self, overlay: Weak<RefCell<GraphicOverlay>>) {
        self.overlay = overlay;
    }

    fn overlay(&self) -> Option<OverlayHandle> {
        self.overlay.upgrade()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
