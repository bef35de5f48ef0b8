//! Image info command.
//!
//! Prints dimensions, byte length and the mean of each channel.

use crate::InfoArgs;
use anyhow::Result;
use pixl_core::PixelBuffer;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;
        println!("{}", path.display());
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Pixels:     {}", image.pixel_count());
        println!("  Bytes:      {}", image.len());

        let mean = mean_rgba(&image);
        println!(
            "  Mean RGBA:  {:.2} {:.2} {:.2} {:.2}",
            mean[0], mean[1], mean[2], mean[3]
        );

        if verbose {
            let opaque = image.pixels().all(|p| p[3] == 255);
            println!("  Opaque:     {}", opaque);
        }

        if args.input.len() > 1 {
            println!();
        }
    }
    Ok(())
}

/// Per-channel mean; zeros for an empty image.
fn mean_rgba(image: &PixelBuffer) -> [f64; 4] {
    let count = image.pixel_count();
    if count == 0 {
        return [0.0; 4];
    }
    let mut sums = [0u64; 4];
    for px in image.pixels() {
        for (sum, v) in sums.iter_mut().zip(px) {
            *sum += u64::from(v);
        }
    }
    sums.map(|s| s as f64 / count as f64)
}
