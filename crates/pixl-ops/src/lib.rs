//! # pixl-ops
//!
//! Pixel-processing operations for the pixl editing engine.
//!
//! Every transform works on RGBA8 bytes in place and saturates to `[0, 255]`.
//! Alpha is never touched by a tone or filter transform.
//!
//! # Modules
//!
//! - [`tone`] - brightness, contrast, grayscale
//! - [`filter`] - 3x3 convolution with clamped edges
//! - [`dispatch`] - named operations (`adjust`, `vintage`, ...) and their pipelines
//! - [`transform`] - 90 degree rotation
//! - [`resize`] - scaling with nearest/bilinear sampling
//!
//! # Example
//!
//! ```rust
//! use pixl_ops::dispatch::{Operation, OperationRequest};
//!
//! let request = OperationRequest {
//!     pixels: [255, 0, 0, 255].repeat(4),
//!     width: 2,
//!     height: 2,
//!     brightness: -50.0,
//!     contrast: 0.0,
//!     op: Operation::Adjust,
//! };
//! let out = request.process().unwrap();
//! assert_eq!(&out[..4], &[205, 0, 0, 255]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod dispatch;
pub mod filter;
pub mod resize;
pub mod tone;
pub mod transform;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use dispatch::{Operation, OperationRequest, Step};
pub use error::{OpsError, OpsResult};
pub use filter::Kernel3;
pub use resize::Filter;
