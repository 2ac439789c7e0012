//! Custom error types for the tracking service.

use thiserror::Error;

/// Service-level errors.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("engine error: {0}")]
    Engine(#[from] stridelog_engine::EngineError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<String> for TrackerError {
    fn from(err: String) -> Self {
        TrackerError::Internal(err)
    }
}

impl From<TrackerError> for String {
    fn from(err: TrackerError) -> Self {
        err.to_string()
    }
}

/// Result type alias for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
