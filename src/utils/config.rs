//! Numeric constants shared across the crate

pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

/// Floor for the cosine-of-declination divisor near the poles
pub const MIN_COSINE_DECLINATION: f64 = 1e-4;

// Canonical path marker scale table, relative to the path size in arcsec
pub const ARROW_HALF_WIDTH_DIVISOR: f64 = 10.0;
pub const MIDDLE_ARROW_SHIFT_FACTOR: f64 = 2.0;
pub const END_MARKER_DIVISOR: f64 = 9.0;
pub const END_MARKER_ROTATION_DEG: f64 = 45.0;

/// Font used for all overlay text
pub const OVERLAY_FONT: &str = "15px Arial";

/// Gap in pixels between a legend source and its label
pub const LEGEND_TEXT_SPACING_LEFT: f64 = 15.0;
