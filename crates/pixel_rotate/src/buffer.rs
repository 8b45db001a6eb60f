// In-memory RGBA image that the rotation routines read and produce.

use std::ops::{Index, IndexMut};

use thiserror::Error;

/// One pixel as (red, green, blue, alpha), 8 bits per channel.
pub type Rgba = [u8; 4];

/// Fill value for destination pixels that have no source pixel.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

#[derive(Debug, Error, PartialEq)]
pub enum BufferError {
    #[error("image dimensions must be nonzero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("expected {expected} pixels, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unable to allocate a {width}x{height} pixel buffer")]
    Allocation { width: usize, height: usize },

    #[error("rotation angle must be finite, got {degrees}")]
    NonFiniteAngle { degrees: f64 },
}

/// A decoded image: `width * height` RGBA quads stored row major,
/// top row first, left pixel first within a row.
///
/// Buffers are never resized in place. The rotation routines always
/// build a new buffer with its own dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Creates a buffer with every pixel set to `fill`.
    pub fn filled(width: usize, height: usize, fill: Rgba) -> Result<Self, BufferError> {
        let len = pixel_count(width, height)?;
        let mut pixels = alloc_pixels(width, height, len)?;
        pixels.resize(len, fill);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, BufferError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a buffer from interleaved RGBA bytes, the layout codecs hand out.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BufferError> {
        let expected = pixel_count(width, height)?;
        if bytes.len() != expected * 4 {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: bytes.len() / 4,
            });
        }

        let mut pixels = alloc_pixels(width, height, expected)?;
        pixels.extend(
            bytes
                .chunks_exact(4)
                .map(|p| [p[0], p[1], p[2], p[3]]),
        );

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Flattens the pixels back into interleaved RGBA bytes.
    pub fn to_rgba_bytes(&self) -> Result<Vec<u8>, BufferError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(self.pixels.len() * 4)
            .map_err(|_| BufferError::Allocation {
                width: self.width,
                height: self.height,
            })?;
        bytes.extend_from_slice(self.pixels.as_flattened());
        Ok(bytes)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`, or `None` outside the image.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, pixel: Rgba) {
        self[(x, y)] = pixel;
    }
}

impl Index<(usize, usize)> for PixelBuffer {
    type Output = Rgba;
    // index is (x, y), i.e. (column, row)
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(index.0 < self.width && index.1 < self.height);
        &self.pixels[index.1 * self.width + index.0]
    }
}

impl IndexMut<(usize, usize)> for PixelBuffer {
    // index is (x, y), i.e. (column, row)
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(index.0 < self.width && index.1 < self.height);
        &mut self.pixels[index.1 * self.width + index.0]
    }
}

fn pixel_count(width: usize, height: usize) -> Result<usize, BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::ZeroDimension { width, height });
    }

    // also reject sizes whose byte length would not fit in memory
    width
        .checked_mul(height)
        .filter(|n| n.checked_mul(4).is_some())
        .ok_or(BufferError::Allocation { width, height })
}

fn alloc_pixels(width: usize, height: usize, len: usize) -> Result<Vec<Rgba>, BufferError> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| BufferError::Allocation { width, height })?;
    Ok(pixels)
}
