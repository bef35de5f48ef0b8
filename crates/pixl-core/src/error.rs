//! Error types for pixl-core.
//!
//! The [`Error`] enum covers buffer shape problems: a byte length that
//! disagrees with `width * height * 4`, or dimensions that overflow.
//!
//! # Usage
//!
//! ```rust
//! use pixl_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
//! assert!(matches!(err, Error::InvalidBufferLength { expected: 16, actual: 15 }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by buffer construction and access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Byte length disagrees with `width * height * 4`.
    #[error("invalid buffer length: expected {expected} bytes, got {actual}")]
    InvalidBufferLength {
        /// Length implied by the dimensions
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Dimensions are unusable (zero where a real image is needed, or overflowing).
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidBufferLength`] error.
    #[inline]
    pub fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidBufferLength { expected, actual }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
