//! Parallel variants of the heavier operations using Rayon.
//!
//! Output is byte-identical to the serial versions; rows are split across
//! the current Rayon pool (use `ThreadPool::install` to pick one).
//!
//! # Example
//!
//! ```rust
//! use pixl_ops::{filter::Kernel3, parallel};
//!
//! let mut px = vec![128u8; 64 * 64 * 4];
//! parallel::convolve(&mut px, 64, 64, &Kernel3::BLUR).unwrap();
//! ```

use crate::filter::{check_dimensions, convolve_row, Kernel3};
use crate::OpsResult;
use pixl_core::CHANNELS;
use rayon::prelude::*;
use tracing::trace;

/// Parallel 3x3 convolution, row by row.
///
/// Same contract as [`crate::filter::convolve`].
pub fn convolve(pixels: &mut [u8], width: usize, height: usize, kernel: &Kernel3) -> OpsResult<()> {
    trace!(width, height, "parallel::convolve");
    check_dimensions(pixels.len(), width, height)?;
    if pixels.is_empty() {
        return Ok(());
    }

    let src = pixels.to_vec();
    pixels
        .par_chunks_exact_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| convolve_row(&src, row, y, width, height, kernel));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter;

    #[test]
    fn test_matches_serial() {
        let (w, h) = (37, 23);
        let src: Vec<u8> = (0..w * h * 4).map(|i| ((i * 31) % 251) as u8).collect();

        for kernel in [Kernel3::BLUR, Kernel3::SHARPEN] {
            let mut serial = src.clone();
            filter::convolve(&mut serial, w, h, &kernel).unwrap();
            let mut par = src.clone();
            convolve(&mut par, w, h, &kernel).unwrap();
            assert_eq!(serial, par);
        }
    }

    #[test]
    fn test_rejects_bad_length() {
        let mut px = vec![0u8; 10];
        assert!(convolve(&mut px, 2, 2, &Kernel3::BLUR).is_err());
    }
}
