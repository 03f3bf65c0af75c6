use thiserror::Error;

pub type AnnotationResult<T> = Result<T, AnnotationError>;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Invalid style parameter '{field}': {value} (must be finite and positive)")]
    InvalidStyle { field: String, value: f64 },

    #[error("Style JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl AnnotationError {
    pub fn invalid_style(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidStyle {
            field: field.into(),
            value,
        }
    }
}

#[cfg(feature = "python")]
impl From<AnnotationError> for pyo3::PyErr {
    fn from(err: AnnotationError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
