//! Error types for image load and export.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Color type or bit depth the loader can't turn into RGBA8.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded data doesn't form a valid buffer.
    #[error(transparent)]
    Core(#[from] pixl_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
