//! Path annotation generation for sky plots
//!
//! This module turns an ordered list of pointings into the polylines and
//! polygons drawn over a sky viewer:
//! - a closed triangle at the first pointing
//! - open arrowheads at intermediate pointings
//! - a segment joining each pair of consecutive pointings
//! - an X at the last pointing
//!
//! Annotation order is the stroke order handed to the viewer.

mod markers;
pub mod path;
pub mod style;

pub use path::{get_path_annotations, get_pointing_path_annotations};
pub use style::PathStyle;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::utils::coordinate_math::Coordinate;

/// Role of an annotation within a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// Closed triangle at the first pointing
    StartMarker,
    /// Open arrowhead at an intermediate pointing
    Arrow,
    /// Line joining two consecutive pointings
    Segment,
    /// X at the last pointing
    EndMarker,
}

/// Ordered list of sky coordinates drawn as one polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub points: Vec<Coordinate>,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, points: Vec<Coordinate>) -> Self {
        Annotation { kind, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the last point repeats the first
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    /// `[ra, dec]` pairs in drawing order
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(Coordinate::to_pair).collect()
    }

    /// Points as an (N, 2) array with columns RA, Dec
    pub fn to_array(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.points.len(), 2), |(i, j)| {
            let point = &self.points[i];
            if j == 0 {
                point.ra
            } else {
                point.dec
            }
        })
    }
}
