//! Decode/encode capability used by the compression pipeline.
//!
//! The pipeline only talks to [`ImageCodec`], so tests can swap in a fake
//! encoder with predictable output sizes. [`JpegCodec`] is the production
//! implementation on top of the `image` crate.

use crate::constants::MAX_IMAGE_DIMENSION;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, ImageReader};
use std::io::Cursor;
use thiserror::Error;

/// Errors raised by a codec. The pipeline attaches the file name.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CodecError {
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Encode(String),
}

pub trait ImageCodec: Send + Sync {
    type Bitmap: Send;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Bitmap, CodecError>;

    fn dimensions(&self, bitmap: &Self::Bitmap) -> (u32, u32);

    fn resize(
        &self,
        bitmap: Self::Bitmap,
        width: u32,
        height: u32,
    ) -> Result<Self::Bitmap, CodecError>;

    /// Encodes at `quality`, a fraction in `(0, 1]`.
    fn encode(&self, bitmap: &Self::Bitmap, quality: f64) -> Result<Vec<u8>, CodecError>;
}

/// Baseline JPEG output backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    pub filter: FilterType,
    pub max_dimension: u32,
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
            max_dimension: MAX_IMAGE_DIMENSION,
        }
    }
}

impl ImageCodec for JpegCodec {
    type Bitmap = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        if reader.format().is_none() {
            return Err(CodecError::Decode("unrecognized image format".to_string()));
        }

        let img = reader
            .decode()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        // Security: Validate image dimensions to prevent memory exhaustion downstream
        let (width, height) = img.dimensions();
        if width > self.max_dimension || height > self.max_dimension {
            return Err(CodecError::Decode(format!(
                "dimensions {}x{} exceed the maximum of {}x{}",
                width, height, self.max_dimension, self.max_dimension
            )));
        }

        Ok(img)
    }

    fn dimensions(&self, bitmap: &DynamicImage) -> (u32, u32) {
        bitmap.dimensions()
    }

    fn resize(
        &self,
        bitmap: DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::Encode(format!(
                "cannot resize to {}x{}",
                width, height
            )));
        }
        if bitmap.dimensions() == (width, height) {
            return Ok(bitmap);
        }
        Ok(bitmap.resize_exact(width, height, self.filter))
    }

    fn encode(&self, bitmap: &DynamicImage, quality: f64) -> Result<Vec<u8>, CodecError> {
        // JPEG has no alpha channel
        let rgb = bitmap.to_rgb8();
        let mut buffer = Vec::new();

        JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality))
            .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        Ok(buffer)
    }
}

/// Maps a `(0, 1]` quality fraction onto the encoder's 1-100 scale.
pub fn jpeg_quality(quality: f64) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}
