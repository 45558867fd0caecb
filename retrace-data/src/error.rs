//! Error types for data loading.

use thiserror::Error;

/// Malformed spline, intrinsics or trigger input.
///
/// Every variant is fatal at load time: callers get no partially built value.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spline component '{component}': {reason}")]
    SplineShape { component: String, reason: String },

    #[error("intrinsics field '{field}' must be positive and finite, got {value}")]
    InvalidIntrinsic { field: &'static str, value: f64 },

    #[error("trigger file line {line}: '{content}' is not a non-negative integer")]
    InvalidTrigger { line: usize, content: String },

    #[error("invalid trigger generation parameters: {0}")]
    InvalidGenerator(String),
}

impl DataFormatError {
    pub(crate) fn spline(component: &str, reason: impl Into<String>) -> Self {
        DataFormatError::SplineShape {
            component: component.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across this crate.
pub type Result<T> = std::result::Result<T, DataFormatError>;
