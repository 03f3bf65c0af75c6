/// Styling configuration for path annotations
///
/// A single immutable value carries every marker scale constant so that no
/// geometry function reads ambient state. It round-trips through JSON so
/// portal settings can be stored alongside instrument configuration.
use serde::{Deserialize, Serialize};

use crate::error::{AnnotationError, AnnotationResult};
use crate::utils::config::{
    ARROW_HALF_WIDTH_DIVISOR, END_MARKER_DIVISOR, END_MARKER_ROTATION_DEG,
    MIDDLE_ARROW_SHIFT_FACTOR,
};

/// Configuration for path annotation generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    /// Emit arrowheads at intermediate pointings
    pub draw_middle_arrows: bool,
    /// Arrow half-width is `size / arrow_half_width_divisor`
    pub arrow_half_width_divisor: f64,
    /// Middle arrows are pushed forward by this many half-widths
    pub middle_arrow_shift_factor: f64,
    /// End marker arms reach `size / end_marker_divisor`
    pub end_marker_divisor: f64,
    /// Rotation of the end marker arms in degrees
    pub end_marker_rotation: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        PathStyle {
            draw_middle_arrows: true,
            arrow_half_width_divisor: ARROW_HALF_WIDTH_DIVISOR,
            middle_arrow_shift_factor: MIDDLE_ARROW_SHIFT_FACTOR,
            end_marker_divisor: END_MARKER_DIVISOR,
            end_marker_rotation: END_MARKER_ROTATION_DEG,
        }
    }
}

/// Marker dimensions in arcseconds derived from a path size
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MarkerScale {
    pub half_width: f64,
    pub length: f64,
    pub middle_shift: f64,
    pub end_arm: f64,
}

impl PathStyle {
    /// Parse and validate a style from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> AnnotationResult<Self> {
        let style: PathStyle = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn with_middle_arrows(mut self, draw_middle_arrows: bool) -> Self {
        self.draw_middle_arrows = draw_middle_arrows;
        self
    }

    pub fn with_end_marker_rotation(mut self, rotation_deg: f64) -> Self {
        self.end_marker_rotation = rotation_deg;
        self
    }

    /// Check that every scale parameter is finite and positive
    pub fn validate(&self) -> AnnotationResult<()> {
        let positive = [
            ("arrow_half_width_divisor", self.arrow_half_width_divisor),
            ("middle_arrow_shift_factor", self.middle_arrow_shift_factor),
            ("end_marker_divisor", self.end_marker_divisor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnnotationError::invalid_style(field, value));
            }
        }
        if !self.end_marker_rotation.is_finite() {
            return Err(AnnotationError::invalid_style(
                "end_marker_rotation",
                self.end_marker_rotation,
            ));
        }
        Ok(())
    }

    pub(crate) fn marker_scale(&self, size_arcsec: f64) -> MarkerScale {
        let half_width = size_arcsec / self.arrow_half_width_divisor;
        MarkerScale {
            half_width,
            // equilateral triangle with side 2w
            length: half_width * 3.0_f64.sqrt(),
            middle_shift: self.middle_arrow_shift_factor * half_width,
            end_arm: size_arcsec / self.end_marker_divisor,
        }
    }
}
