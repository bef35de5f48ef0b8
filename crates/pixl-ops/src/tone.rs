//! Tone transforms: brightness, contrast, grayscale.
//!
//! All functions take RGBA8 bytes and update R, G, B in place. Alpha is
//! left alone. Results saturate to `[0, 255]`; the float to byte step
//! truncates toward zero.
//!
//! A slice that isn't a whole number of pixels is rejected before any
//! byte is written.
//!
//! # Example
//!
//! ```rust
//! use pixl_ops::tone::{brightness, contrast, grayscale};
//!
//! let mut px = vec![0u8, 0, 255, 255];
//! grayscale(&mut px, true).unwrap();
//! assert_eq!(px, vec![29, 29, 29, 255]);
//!
//! brightness(&mut px, 100.0).unwrap();
//! contrast(&mut px, 0.0).unwrap();
//! assert_eq!(px, vec![129, 129, 129, 255]);
//! ```

use crate::{OpsError, OpsResult};
use pixl_core::CHANNELS;
use tracing::trace;

/// Mid-gray pivot for contrast.
pub const MID_GRAY: f64 = 128.0;

/// Contrast amounts are clamped to `[-CONTRAST_LIMIT, CONTRAST_LIMIT]`.
pub const CONTRAST_LIMIT: f64 = 255.0;

/// Rec.601 luma weights in thousandths. They sum to exactly 1000.
pub const LUMA_WEIGHTS: [u32; 3] = [299, 587, 114];

fn check_rgba(pixels: &[u8]) -> OpsResult<()> {
    if pixels.len() % CHANNELS != 0 {
        let expected = pixels.len() / CHANNELS * CHANNELS;
        return Err(OpsError::InvalidBufferLength {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[inline]
fn to_byte(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Adds `amount` to every R, G, B value.
///
/// `amount` may be negative. Clamping is lossy: `brightness(200)` followed by
/// `brightness(-200)` on a channel at 250 ends at 55, not 250.
pub fn brightness(pixels: &mut [u8], amount: f64) -> OpsResult<()> {
    trace!(len = pixels.len(), amount, "brightness");
    check_rgba(pixels)?;
    if amount == 0.0 {
        return Ok(());
    }

    for px in pixels.chunks_exact_mut(CHANNELS) {
        for v in &mut px[..3] {
            *v = to_byte(*v as f64 + amount);
        }
    }
    Ok(())
}

/// Multiplicative gain for a contrast amount.
///
/// `259 * (c + 255) / (255 * (259 - c))` with `c` clamped to `[-255, 255]`,
/// so the gain ranges from 0 (flat gray) to about 129 and `factor(0) == 1`.
///
/// ```rust
/// use pixl_ops::tone::contrast_factor;
///
/// assert_eq!(contrast_factor(0.0), 1.0);
/// assert!(contrast_factor(40.0) > 1.0);
/// assert!(contrast_factor(-15.0) < 1.0);
/// ```
pub fn contrast_factor(amount: f64) -> f64 {
    let c = amount.clamp(-CONTRAST_LIMIT, CONTRAST_LIMIT);
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Linear contrast stretch around mid-gray (128).
pub fn contrast(pixels: &mut [u8], amount: f64) -> OpsResult<()> {
    trace!(len = pixels.len(), amount, "contrast");
    check_rgba(pixels)?;
    let factor = contrast_factor(amount);
    if factor == 1.0 {
        return Ok(());
    }

    for px in pixels.chunks_exact_mut(CHANNELS) {
        for v in &mut px[..3] {
            *v = to_byte((*v as f64 - MID_GRAY) * factor + MID_GRAY);
        }
    }
    Ok(())
}

/// Gray value for one pixel.
///
/// With `preserve_luminance` this is Rec.601 luma, otherwise the plain
/// average. Both are exact for gray input, so gray stays gray.
#[inline]
pub fn luma(r: u8, g: u8, b: u8, preserve_luminance: bool) -> u8 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    let v = if preserve_luminance {
        let [wr, wg, wb] = LUMA_WEIGHTS;
        (wr * r + wg * g + wb * b + 500) / 1000
    } else {
        (r + g + b + 1) / 3
    };
    v.min(255) as u8
}

/// Replaces R, G, B with one gray value per pixel. Idempotent.
pub fn grayscale(pixels: &mut [u8], preserve_luminance: bool) -> OpsResult<()> {
    trace!(len = pixels.len(), preserve_luminance, "grayscale");
    check_rgba(pixels)?;

    for px in pixels.chunks_exact_mut(CHANNELS) {
        let y = luma(px[0], px[1], px[2], preserve_luminance);
        px[0] = y;
        px[1] = y;
        px[2] = y;
    }
    Ok(())
}
