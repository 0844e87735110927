//! Error types shared by the element store, propagator facade and run loop.

use thiserror::Error;

/// Result type for orrery operations
pub type OrreryResult<T> = Result<T, OrreryError>;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Invalid orbital elements for {body}: {reason}")]
    InvalidElements { body: String, reason: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid orbit path sample count: {0}")]
    InvalidSampleCount(usize),

    #[error("Invalid run parameters: {0}")]
    InvalidParameters(String),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (InvalidElements { body, reason }, InvalidElements { body: b, reason: r }) => {
                body == b && reason == r
            }
            (InvalidTimestamp(a), InvalidTimestamp(b)) => a == b,
            (InvalidSampleCount(a), InvalidSampleCount(b)) => a == b,
            (InvalidParameters(a), InvalidParameters(b)) => a == b,

            // Wrapped library errors only compare by variant
            (Io(_), Io(_)) => true,
            (Json(_), Json(_)) => true,
            (Csv(_), Csv(_)) => true,

            _ => false,
        }
    }
}
