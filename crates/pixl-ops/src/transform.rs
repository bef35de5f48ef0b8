//! Geometric transformations.
//!
//! Rotation by a quarter turn. Dimensions swap; no resampling happens.
//!
//! # Example
//!
//! ```rust
//! use pixl_core::PixelBuffer;
//! use pixl_ops::transform::rotate_90_cw;
//!
//! let src = PixelBuffer::new(4, 2);
//! let dst = rotate_90_cw(&src).unwrap();
//! assert_eq!(dst.dimensions(), (2, 4));
//! ```

use crate::{OpsError, OpsResult};
use pixl_core::{PixelBuffer, CHANNELS};
use tracing::trace;

/// Rotates 90 degrees clockwise.
///
/// The source pixel at `(x, y)` lands at `(height - 1 - y, x)`.
/// An empty source is rejected since the result would be empty too.
pub fn rotate_90_cw(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    let (width, height) = (src.width() as usize, src.height() as usize);
    trace!(width, height, "rotate_90_cw");
    if src.is_empty() {
        return Err(OpsError::InvalidDimensions(format!(
            "cannot rotate {width}x{height} image"
        )));
    }

    let new_w = height;
    let mut dst = PixelBuffer::new(src.height(), src.width());
    let data = src.data();
    let out = dst.data_mut();

    for y in 0..height {
        for x in 0..width {
            let src_idx = (y * width + x) * CHANNELS;
            let new_x = height - 1 - y;
            let new_y = x;
            let dst_idx = (new_y * new_w + new_x) * CHANNELS;
            out[dst_idx..dst_idx + CHANNELS].copy_from_slice(&data[src_idx..src_idx + CHANNELS]);
        }
    }

    Ok(dst)
}
