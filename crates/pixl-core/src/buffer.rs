//! RGBA8 pixel buffer.
//!
//! [`PixelBuffer`] is the unit of data the engine reads and writes: a flat
//! `width * height * 4` byte vector in R, G, B, A order, row-major, no
//! padding between rows.
//!
//! The length invariant is enforced at construction and can't be broken
//! afterwards since `data_mut` only hands out a slice.
//!
//! # Example
//!
//! ```rust
//! use pixl_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::filled(2, 2, [255, 0, 0, 255]);
//! buf.set_pixel(1, 1, [0, 0, 255, 255]);
//! assert_eq!(buf.pixel(1, 1), [0, 0, 255, 255]);
//! assert_eq!(buf.len(), 16);
//! ```

use crate::{Error, Result};

/// Channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Returns `width * height * 4`, or an error if that overflows `usize`.
pub fn expected_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

/// Flat RGBA8 image buffer with its dimensions.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a transparent black buffer.
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows `usize`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Creates a buffer with every pixel set to `pixel`.
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows `usize`.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self { width, height, data }
    }

    /// Wraps existing RGBA bytes.
    ///
    /// Fails with [`Error::InvalidBufferLength`] if `data.len()` is not
    /// `width * height * 4`. The bytes are never truncated or padded.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(Error::invalid_length(expected, data.len()));
        }
        Ok(Self { width, height, data })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length (`pixel_count * 4`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-sized buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes. The length is fixed.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// True when both buffers have the same dimensions.
    #[inline]
    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        match self.get_pixel(x, y) {
            Some(px) => px,
            None => panic!("pixel ({x}, {y}) out of bounds for {}x{}", self.width, self.height),
        }
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&pixel);
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.len(), 24);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_rgba_rejects_bad_length() {
        let err = PixelBuffer::from_rgba(2, 2, vec![0; 12]).unwrap_err();
        assert_eq!(err, Error::invalid_length(16, 12));

        // Too long is just as wrong as too short.
        assert!(PixelBuffer::from_rgba(1, 1, vec![0; 5]).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let mut buf = PixelBuffer::filled(4, 3, [1, 2, 3, 4]);
        buf.set_pixel(3, 2, [9, 8, 7, 6]);
        assert_eq!(buf.pixel(3, 2), [9, 8, 7, 6]);
        assert_eq!(buf.pixel(0, 0), [1, 2, 3, 4]);
        assert_eq!(&buf.data()[buf.len() - 4..], &[9, 8, 7, 6]);
        assert_eq!(buf.get_pixel(4, 0), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds for 2x2")]
    fn test_pixel_out_of_bounds_panics() {
        PixelBuffer::new(2, 2).pixel(0, 2);
    }

    #[test]
    fn test_zero_sized() {
        let buf = PixelBuffer::from_rgba(0, 5, Vec::new()).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.pixels().count(), 0);
    }

    #[test]
    fn test_expected_len_overflow() {
        assert!(expected_len(u32::MAX, u32::MAX).is_err());
        assert_eq!(expected_len(3, 5).unwrap(), 60);
    }
}
