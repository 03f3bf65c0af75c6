// Module declarations
pub mod annotations;
pub mod error;
pub mod overlay;
#[cfg(feature = "python")]
mod python;
pub mod utils;

// Re-export public API
pub use annotations::{
    get_path_annotations, get_pointing_path_annotations, Annotation, AnnotationKind, PathStyle,
};
pub use error::{AnnotationError, AnnotationResult};
pub use utils::coordinate_math::{
    cosine_declination_term, offset_coordinate, rotate_coordinate, Coordinate, Offset,
};
