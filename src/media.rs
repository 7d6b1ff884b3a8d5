//! Image decode, thumbnail resize and JPEG encoding.
//!
//! Captured photos are stored twice: a full-resolution JPEG and a width-200
//! thumbnail that doubles as the record's existence marker.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Width every thumbnail is resized to; height follows the aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 200;
/// JPEG quality for both the full image and the thumbnail.
pub const JPEG_QUALITY: u8 = 80;

/// Decode caller-supplied image bytes into a [`DynamicImage`].
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| StoreError::encoding(e.to_string()))
}

/// Resize to [`THUMBNAIL_WIDTH`], preserving aspect ratio.
pub fn thumbnail(image: &DynamicImage) -> DynamicImage {
    let scale = THUMBNAIL_WIDTH as f32 / image.width() as f32;
    let height = ((image.height() as f32 * scale).round() as u32).max(1);
    debug!(
        from_w = image.width(),
        from_h = image.height(),
        to_w = THUMBNAIL_WIDTH,
        to_h = height,
        "resizing thumbnail"
    );
    image.resize_exact(THUMBNAIL_WIDTH, height, FilterType::Triangle)
}

/// Encode as JPEG at [`JPEG_QUALITY`].
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    encoder
        .encode_image(&image.to_rgb8())
        .map_err(|e| StoreError::encoding(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([120, 30, 200])))
    }

    #[test]
    fn test_thumbnail_keeps_aspect_ratio() {
        let thumb = thumbnail(&sample(400, 300));
        assert_eq!(thumb.width(), 200);
        assert_eq!(thumb.height(), 150);

        let tall = thumbnail(&sample(100, 400));
        assert_eq!(tall.width(), 200);
        assert_eq!(tall.height(), 800);
    }

    #[test]
    fn test_encode_then_decode() {
        let bytes = encode_jpeg(&sample(64, 48)).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn test_decode_garbage_is_encoding_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, StoreError::EncodingFailed { .. }));
    }
}
