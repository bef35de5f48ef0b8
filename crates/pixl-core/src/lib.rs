//! # pixl-core
//!
//! Core types for the pixl editing engine.
//!
//! - [`PixelBuffer`] - flat RGBA8 buffer with its dimensions
//! - [`Error`] / [`Result`] - buffer shape errors shared by every crate
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other pixl crates build on it:
//!
//! ```text
//! pixl-core (this crate)
//!    ^
//!    |
//!    +-- pixl-ops (transforms, dispatcher, geometry)
//!    +-- pixl-io (PNG load/export)
//!    +-- pixl-edit (worker, history, controller)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;

pub use buffer::{expected_len, PixelBuffer, CHANNELS};
pub use error::{Error, Result};
