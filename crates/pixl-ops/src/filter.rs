//! 3x3 convolution filtering.
//!
//! Provides the blur and sharpen kernels used by the operation presets.
//!
//! # Kernels
//!
//! - [`Kernel3::BLUR`] - 1-2-1 binomial blur, normalized by 1/16
//! - [`Kernel3::SHARPEN`] - 4-neighbour sharpen, normalization 1
//! - [`Kernel3::IDENTITY`] - center tap only
//!
//! # Edges
//!
//! Neighbours outside the image reuse the nearest in-range pixel (clamped
//! sampling), so border pixels are neither darkened nor skipped.
//!
//! # Example
//!
//! ```rust
//! use pixl_ops::filter::{convolve, Kernel3};
//!
//! let mut px = [90u8, 40, 10, 255].repeat(16);
//! convolve(&mut px, 4, 4, &Kernel3::BLUR).unwrap();
//! assert!(px.chunks(4).all(|p| p == [90, 40, 10, 255]));
//! ```

use crate::{OpsError, OpsResult};
use pixl_core::CHANNELS;
use tracing::trace;

/// 3x3 convolution kernel with a normalization factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    /// Row-major weights.
    pub weights: [f32; 9],
    /// Applied to the weighted sum before clamping.
    pub normalization: f64,
}

impl Kernel3 {
    /// Binomial blur.
    pub const BLUR: Self = Self {
        weights: [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0],
        normalization: 1.0 / 16.0,
    };

    /// 4-neighbour sharpen.
    pub const SHARPEN: Self = Self {
        weights: [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        normalization: 1.0,
    };

    /// Center tap only; leaves the image unchanged.
    pub const IDENTITY: Self = Self {
        weights: [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        normalization: 1.0,
    };

    /// Creates a kernel from weights and normalization.
    pub const fn new(weights: [f32; 9], normalization: f64) -> Self {
        Self { weights, normalization }
    }
}

/// Checks that `len` is exactly `width * height * 4`.
pub(crate) fn check_dimensions(len: usize, width: usize, height: usize) -> OpsResult<()> {
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;
    if len != expected {
        return Err(OpsError::InvalidBufferLength { expected, actual: len });
    }
    Ok(())
}

/// Computes one output row from the untouched source.
///
/// Shared by the serial and parallel paths so both produce identical bytes.
#[inline]
pub(crate) fn convolve_row(
    src: &[u8],
    dst_row: &mut [u8],
    y: usize,
    width: usize,
    height: usize,
    kernel: &Kernel3,
) {
    let stride = width * CHANNELS;
    let factor = kernel.normalization as f32;
    let rows = [y.saturating_sub(1), y, (y + 1).min(height - 1)];

    for x in 0..width {
        let cols = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
        let out = x * CHANNELS;

        for c in 0..3 {
            let mut acc = 0.0f32;
            for (ky, &sy) in rows.iter().enumerate() {
                for (kx, &sx) in cols.iter().enumerate() {
                    acc += src[sy * stride + sx * CHANNELS + c] as f32 * kernel.weights[ky * 3 + kx];
                }
            }
            dst_row[out + c] = (acc * factor).clamp(0.0, 255.0) as u8;
        }
        dst_row[out + 3] = src[y * stride + out + 3];
    }
}

/// Applies a 3x3 kernel to RGBA bytes in place.
///
/// Reads from a snapshot of the input so updated pixels never feed into
/// their neighbours. Alpha passes through. The length is validated before
/// anything is written.
///
/// # Example
///
/// ```rust
/// use pixl_ops::filter::{convolve, Kernel3};
///
/// let src: Vec<u8> = (0..36).collect();
/// let mut px = src.clone();
/// convolve(&mut px, 3, 3, &Kernel3::IDENTITY).unwrap();
/// assert_eq!(px, src);
/// ```
pub fn convolve(pixels: &mut [u8], width: usize, height: usize, kernel: &Kernel3) -> OpsResult<()> {
    trace!(width, height, normalization = kernel.normalization, "convolve");
    check_dimensions(pixels.len(), width, height)?;
    if pixels.is_empty() {
        return Ok(());
    }

    let src = pixels.to_vec();
    for (y, row) in pixels.chunks_exact_mut(width * CHANNELS).enumerate() {
        convolve_row(&src, row, y, width, height, kernel);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        let mut px = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                px.extend_from_slice(&[(x * 40) as u8, (y * 50) as u8, ((x + y) * 20) as u8, 200]);
            }
        }
        px
    }

    #[test]
    fn test_identity_kernel() {
        let src = gradient(5, 4);
        let mut px = src.clone();
        convolve(&mut px, 5, 4, &Kernel3::IDENTITY).unwrap();
        assert_eq!(px, src);
    }

    #[test]
    fn test_flat_field_fixed_point() {
        for kernel in [Kernel3::BLUR, Kernel3::SHARPEN] {
            let mut px = [37u8, 140, 250, 90].repeat(6 * 5);
            convolve(&mut px, 6, 5, &kernel).unwrap();
            assert!(px.chunks(4).all(|p| p == [37, 140, 250, 90]));
        }
    }

    #[test]
    fn test_corner_uses_clamped_neighbours() {
        // 2x2 red channel: [10, 50 / 90, 130]
        let mut px = vec![
            10, 0, 0, 255, 50, 0, 0, 255, //
            90, 0, 0, 255, 130, 0, 0, 255,
        ];
        convolve(&mut px, 2, 2, &Kernel3::BLUR).unwrap();

        // Top-left neighbourhood with repeated edges:
        //   10 10 50
        //   10 10 50
        //   90 90 130
        let manual = (10 + 2 * 10 + 50 + 2 * 10 + 4 * 10 + 2 * 50 + 90 + 2 * 90 + 130) as f32 / 16.0;
        assert_eq!(px[0], manual as u8);
        assert_eq!(px[0], 40);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_sharpen_edge_not_zero_padded() {
        // Zero padding would subtract nothing at the border and brighten it.
        let mut px = [100u8, 100, 100, 255].repeat(9);
        px[4 * 4] = 200; // center pixel red
        convolve(&mut px, 3, 3, &Kernel3::SHARPEN).unwrap();
        assert_eq!(px[0], 100); // corner doesn't touch the center
        assert_eq!(px[4], 0); // top-middle: 5*100 - 100 - 100 - 100 - 200
        assert_eq!(px[16], 255); // center: 5*200 - 4*100
    }

    #[test]
    fn test_source_snapshot_not_in_place_leak() {
        // Single bright column; blur must be symmetric left and right of it.
        let mut px = vec![0u8; 5 * 1 * 4];
        px[2 * 4] = 160;
        convolve(&mut px, 5, 1, &Kernel3::BLUR).unwrap();
        assert_eq!(px[4], px[12]);
        assert_eq!(px[0], px[16]);
    }

    #[test]
    fn test_single_pixel() {
        let mut px = vec![10, 20, 30, 40];
        convolve(&mut px, 1, 1, &Kernel3::SHARPEN).unwrap();
        assert_eq!(px, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut px = vec![7u8; 4 * 5];
        let err = convolve(&mut px, 2, 3, &Kernel3::BLUR).unwrap_err();
        assert_eq!(err, OpsError::InvalidBufferLength { expected: 24, actual: 20 });
        assert!(px.iter().all(|&v| v == 7));
    }
}
