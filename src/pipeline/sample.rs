use serde::Deserialize;

use crate::error::{PaletteError, Result};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// A decoded image as a flat, row-major RGBA byte buffer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPixels")]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

#[derive(Deserialize)]
struct RawPixels {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl TryFrom<RawPixels> for PixelBuffer {
    type Error = PaletteError;

    fn try_from(raw: RawPixels) -> Result<Self> {
        PixelBuffer::new(raw.width, raw.height, raw.data)
    }
}

impl PixelBuffer {
    /// Wrap RGBA bytes, checking the length against the declared size.
    /// Dimensions whose byte count overflows `usize` are always rejected.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(PaletteError::PixelBufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// One opaque pixel in 8-bit sRGB.
pub type PixelSample = [u8; 3];

/// Take every `stride`-th pixel, skipping those with alpha below
/// `alpha_threshold`.
pub fn sample_pixels(pixels: &PixelBuffer, stride: usize, alpha_threshold: u8) -> Vec<PixelSample> {
    pixels
        .data
        .chunks_exact(CHANNELS)
        .step_by(stride.max(1))
        .filter(|px| px[3] >= alpha_threshold)
        .map(|px| [px[0], px[1], px[2]])
        .collect()
}
