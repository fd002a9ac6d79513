use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use tracing::debug;

use crate::pipeline::sample::PixelBuffer;

/// Longest side an image is scaled down to before clustering.
pub const MAX_DIM: u32 = 200;

/// Decode an image file, downscale it to fit within `MAX_DIM` (preserving
/// aspect ratio) and return its RGBA pixels.
pub fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;

    let (width, height) = (img.width(), img.height());
    let img = if width > MAX_DIM || height > MAX_DIM {
        img.resize(MAX_DIM, MAX_DIM, FilterType::Triangle)
    } else {
        img
    };
    debug!(
        path = %path.display(),
        original_width = width,
        original_height = height,
        width = img.width(),
        height = img.height(),
        "decoded image"
    );

    Ok(PixelBuffer::from(img.to_rgba8()))
}
