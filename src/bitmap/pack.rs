use image::{GrayImage, Luma};

use crate::foundation::error::{GifSketchError, GifSketchResult};

/// A monochrome raster at one bit per pixel.
///
/// Rows are packed left to right, most significant bit first, and each row starts on a byte
/// boundary: a row takes `ceil(width / 8)` bytes and unused trailing bits are zero. This is
/// the layout `drawBitmap` style display drivers expect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBitmap {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PackedBitmap {
    /// Bytes per packed row.
    pub fn stride(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    /// Pack a black/white image. A pixel is on when its value is above zero; `invert` flips
    /// that after the test.
    pub fn pack(mono: &GrayImage, invert: bool) -> Self {
        let (width, height) = mono.dimensions();
        let stride = Self::stride(width);
        let mut bytes = vec![0u8; stride * height as usize];

        for (x, y, px) in mono.enumerate_pixels() {
            let on = (px.0[0] > 0) != invert;
            if on {
                bytes[y as usize * stride + x as usize / 8] |= 0x80 >> (x % 8);
            }
        }

        Self {
            width,
            height,
            bytes,
        }
    }

    /// Wrap already packed bytes, checking the length against the dimensions.
    pub fn from_bytes(width: u32, height: u32, bytes: Vec<u8>) -> GifSketchResult<Self> {
        let expected = Self::stride(width) * height as usize;
        if bytes.len() != expected {
            return Err(GifSketchError::validation(format!(
                "{width}x{height} bitmap needs {expected} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed rows, `stride(width)` bytes each.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw bit at `(x, y)`, as stored (after any inversion). `None` outside the bitmap,
    /// including the zero padding at the end of each row.
    pub fn bit(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * Self::stride(self.width) + x as usize / 8;
        Some(self.bytes[idx] & (0x80 >> (x % 8)) != 0)
    }

    /// Expand back to a black/white image (0 or 255), undoing `invert`.
    pub fn unpack(&self, invert: bool) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.bit(x, y) == Some(!invert) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bitmap/pack.rs"]
mod tests;
