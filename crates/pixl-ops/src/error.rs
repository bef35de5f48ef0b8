//! Error types for pixel operations.

use thiserror::Error;

/// Error type for pixel operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// Buffer length disagrees with its dimensions (or isn't whole RGBA pixels).
    #[error("invalid buffer length: expected {expected} bytes, got {actual}")]
    InvalidBufferLength {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },

    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<pixl_core::Error> for OpsError {
    fn from(err: pixl_core::Error) -> Self {
        match err {
            pixl_core::Error::InvalidBufferLength { expected, actual } => {
                Self::InvalidBufferLength { expected, actual }
            }
            other => Self::InvalidDimensions(other.to_string()),
        }
    }
}

/// Result type for pixel operations.
pub type OpsResult<T> = Result<T, OpsError>;
