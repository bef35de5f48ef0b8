//! PNG format support.
//!
//! Reads 8-bit and 16-bit gray, gray+alpha, RGB, RGBA and palette images
//! into RGBA8. 16-bit samples keep their high byte; missing alpha becomes
//! opaque. Writes RGBA8 with an sRGB chunk.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixl_io::png::{read_png, write_png};
//!
//! let image = read_png("input.png")?;
//! write_png("output.png", &image)?;
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use pixl_core::{PixelBuffer, CHANNELS};
use tracing::debug;

use crate::{IoError, IoResult};

/// Reads a PNG file into an RGBA8 buffer.
pub fn read_png<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!("{:?} {:?}", info.color_type, info.bit_depth)));
    }

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf.chunks_exact(3).flat_map(|c| [c[0], c[1], c[2], 255]).collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => {
            buf.chunks_exact(2).flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]]).collect()
        }
        other => return Err(IoError::UnsupportedFormat(format!("{other:?}"))),
    };

    debug!(path = %path.display(), width = info.width, height = info.height, "read png");
    Ok(PixelBuffer::from_rgba(info.width, info.height, rgba)?)
}

/// Writes a buffer to a PNG file as RGBA8.
pub fn write_png<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    if image.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot encode {}x{} image",
            image.width(),
            image.height()
        )));
    }
    debug_assert_eq!(image.len(), image.pixel_count() * CHANNELS);

    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer.finish().map_err(|e| IoError::EncodeError(e.to_string()))?;

    debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(path: &Path, w: u32, h: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), w, h);
        encoder.set_color(color);
        encoder.set_depth(depth);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_rgba_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let mut image = PixelBuffer::new(5, 3);
        for y in 0..3 {
            for x in 0..5 {
                image.set_pixel(x, y, [(x * 50) as u8, (y * 80) as u8, 7, (x * 40 + 60) as u8]);
            }
        }
        write_png(&path, &image).unwrap();
        assert_eq!(read_png(&path).unwrap(), image);
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        encode_raw(&path, 2, 1, png::ColorType::Rgb, png::BitDepth::Eight, &[1, 2, 3, 4, 5, 6]);
        let image = read_png(&path).unwrap();
        assert_eq!(image.data(), &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_gray_and_gray_alpha_expand() {
        let dir = tempfile::tempdir().unwrap();
        let gray = dir.path().join("gray.png");
        encode_raw(&gray, 2, 1, png::ColorType::Grayscale, png::BitDepth::Eight, &[10, 200]);
        assert_eq!(read_png(&gray).unwrap().data(), &[10, 10, 10, 255, 200, 200, 200, 255]);

        let gray_alpha = dir.path().join("gray_alpha.png");
        encode_raw(&gray_alpha, 1, 1, png::ColorType::GrayscaleAlpha, png::BitDepth::Eight, &[77, 128]);
        assert_eq!(read_png(&gray_alpha).unwrap().data(), &[77, 77, 77, 128]);
    }

    #[test]
    fn test_sixteen_bit_keeps_high_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb16.png");
        // Big-endian samples: 0x1234, 0xABCD, 0xFF00
        encode_raw(&path, 1, 1, png::ColorType::Rgb, png::BitDepth::Sixteen, &[0x12, 0x34, 0xAB, 0xCD, 0xFF, 0x00]);
        assert_eq!(read_png(&path).unwrap().data(), &[0x12, 0xAB, 0xFF, 255]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_png(dir.path().join("nope.png")), Err(IoError::Io(_))));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(read_png(&path), Err(IoError::DecodeError(_))));
    }

    #[test]
    fn test_empty_image_not_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        assert!(matches!(write_png(&path, &PixelBuffer::new(0, 4)), Err(IoError::EncodeError(_))));
        assert!(!path.exists());
    }
}
