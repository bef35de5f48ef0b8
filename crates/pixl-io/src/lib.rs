//! # pixl-io
//!
//! Image load and export for the pixl engine.
//!
//! Everything comes in and goes out as a [`PixelBuffer`](pixl_core::PixelBuffer)
//! in RGBA8. Only PNG is supported.
//!
//! ```rust,ignore
//! use pixl_io::{read_png, write_png};
//!
//! let image = read_png("input.png")?;
//! write_png("output.png", &image)?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod png;

pub use error::{IoError, IoResult};
pub use crate::png::{read_png, write_png};
