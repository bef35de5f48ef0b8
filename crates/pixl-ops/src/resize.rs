//! Image resize and resampling.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - no interpolation (blocky)
//! - [`Filter::Bilinear`] - linear interpolation, like a smoothed canvas draw
//!
//! # Example
//!
//! ```rust
//! use pixl_core::PixelBuffer;
//! use pixl_ops::resize::{scale, Filter};
//!
//! let src = PixelBuffer::filled(16, 10, [10, 20, 30, 255]);
//! let half = scale(&src, 0.5, Filter::Bilinear).unwrap();
//! assert_eq!(half.dimensions(), (8, 5));
//! ```

use std::str::FromStr;

use crate::{OpsError, OpsResult};
use pixl_core::{PixelBuffer, CHANNELS};
use tracing::{debug, trace};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            other => Err(OpsError::InvalidParameter(format!("unknown filter: {other}"))),
        }
    }
}

/// Resizes to an exact size.
pub fn resize(src: &PixelBuffer, dst_w: u32, dst_h: u32, filter: Filter) -> OpsResult<PixelBuffer> {
    trace!(src_w = src.width(), src_h = src.height(), dst_w, dst_h, ?filter, "resize");
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "destination size must be > 0, got {dst_w}x{dst_h}"
        )));
    }
    if src.is_empty() {
        return Err(OpsError::InvalidDimensions("source image is empty".into()));
    }

    let mut dst = PixelBuffer::new(dst_w, dst_h);
    match filter {
        Filter::Nearest => resize_nearest(src, &mut dst),
        Filter::Bilinear => resize_bilinear(src, &mut dst),
    }
    Ok(dst)
}

/// Scales both dimensions by `factor`, rounding the new size down.
pub fn scale(src: &PixelBuffer, factor: f64, filter: Filter) -> OpsResult<PixelBuffer> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "scale factor must be finite and > 0, got {factor}"
        )));
    }
    let new_w = (src.width() as f64 * factor).floor();
    let new_h = (src.height() as f64 * factor).floor();
    if new_w < 1.0 || new_h < 1.0 || new_w > u32::MAX as f64 || new_h > u32::MAX as f64 {
        return Err(OpsError::InvalidDimensions(format!(
            "{}x{} scaled by {factor} gives {new_w}x{new_h}",
            src.width(),
            src.height()
        )));
    }
    debug!(factor, new_w, new_h, "scale");
    resize(src, new_w as u32, new_h as u32, filter)
}

/// Maps a destination pixel center back to source coordinates.
#[inline]
fn source_coord(dst: usize, ratio: f32) -> f32 {
    (dst as f32 + 0.5) * ratio - 0.5
}

fn resize_nearest(src: &PixelBuffer, dst: &mut PixelBuffer) {
    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let (dst_w, dst_h) = (dst.width() as usize, dst.height() as usize);
    let data = src.data();
    let out = dst.data_mut();

    for y in 0..dst_h {
        let sy = (y * src_h / dst_h).min(src_h - 1);
        for x in 0..dst_w {
            let sx = (x * src_w / dst_w).min(src_w - 1);
            let s = (sy * src_w + sx) * CHANNELS;
            let d = (y * dst_w + x) * CHANNELS;
            out[d..d + CHANNELS].copy_from_slice(&data[s..s + CHANNELS]);
        }
    }
}

fn resize_bilinear(src: &PixelBuffer, dst: &mut PixelBuffer) {
    let (src_w, src_h) = (src.width() as usize, src.height() as usize);
    let (dst_w, dst_h) = (dst.width() as usize, dst.height() as usize);
    let rx = src_w as f32 / dst_w as f32;
    let ry = src_h as f32 / dst_h as f32;
    let data = src.data();
    let out = dst.data_mut();

    for y in 0..dst_h {
        let fy = source_coord(y, ry).clamp(0.0, (src_h - 1) as f32);
        let y0 = fy.floor() as usize;
        let y1 = (y0 + 1).min(src_h - 1);
        let ty = fy - y0 as f32;

        for x in 0..dst_w {
            let fx = source_coord(x, rx).clamp(0.0, (src_w - 1) as f32);
            let x0 = fx.floor() as usize;
            let x1 = (x0 + 1).min(src_w - 1);
            let tx = fx - x0 as f32;

            let p00 = (y0 * src_w + x0) * CHANNELS;
            let p10 = (y0 * src_w + x1) * CHANNELS;
            let p01 = (y1 * src_w + x0) * CHANNELS;
            let p11 = (y1 * src_w + x1) * CHANNELS;
            let d = (y * dst_w + x) * CHANNELS;

            for c in 0..CHANNELS {
                let top = data[p00 + c] as f32 * (1.0 - tx) + data[p10 + c] as f32 * tx;
                let bottom = data[p01 + c] as f32 * (1.0 - tx) + data[p11 + c] as f32 * tx;
                let v = top * (1.0 - ty) + bottom * ty;
                out[d + c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_half_dimensions() {
        let src = PixelBuffer::new(7, 5);
        let dst = scale(&src, 0.5, Filter::Bilinear).unwrap();
        assert_eq!(dst.dimensions(), (3, 2));
    }

    #[test]
    fn test_uniform_stays_uniform() {
        let src = PixelBuffer::filled(9, 6, [10, 120, 240, 77]);
        for filter in [Filter::Nearest, Filter::Bilinear] {
            let up = resize(&src, 20, 13, filter).unwrap();
            assert!(up.pixels().all(|p| p == [10, 120, 240, 77]));
            let down = scale(&src, 0.5, filter).unwrap();
            assert!(down.pixels().all(|p| p == [10, 120, 240, 77]));
        }
    }

    #[test]
    fn test_bilinear_half_averages_pairs() {
        let src = PixelBuffer::from_rgba(2, 1, vec![0, 0, 0, 255, 200, 100, 50, 255]).unwrap();
        let dst = resize(&src, 1, 1, Filter::Bilinear).unwrap();
        assert_eq!(dst.pixel(0, 0), [100, 50, 25, 255]);
    }

    #[test]
    fn test_nearest_upscale_repeats() {
        let src = PixelBuffer::from_rgba(2, 1, vec![1, 1, 1, 1, 9, 9, 9, 9]).unwrap();
        let dst = resize(&src, 4, 1, Filter::Nearest).unwrap();
        let reds: Vec<u8> = dst.pixels().map(|p| p[0]).collect();
        assert_eq!(reds, vec![1, 1, 9, 9]);
    }

    #[test]
    fn test_scale_rejects_degenerate() {
        let src = PixelBuffer::new(1, 1);
        assert!(matches!(scale(&src, 0.5, Filter::Bilinear), Err(OpsError::InvalidDimensions(_))));
        assert!(matches!(scale(&src, 0.0, Filter::Bilinear), Err(OpsError::InvalidParameter(_))));
        assert!(matches!(scale(&src, f64::NAN, Filter::Nearest), Err(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("Nearest".parse::<Filter>().unwrap(), Filter::Nearest);
        assert_eq!("bilinear".parse::<Filter>().unwrap(), Filter::Bilinear);
        assert!("lanczos".parse::<Filter>().is_err());
    }
}
