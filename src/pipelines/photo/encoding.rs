// SPDX-License-Identifier: GPL-3.0-only

//! PNG encoding and data URI conversion
//!
//! Photos travel between capture and composition as self-describing
//! `data:image/png;base64,...` URIs.

use crate::constants::PNG_DATA_URI_PREFIX;
use crate::errors::PhotoError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use std::sync::Arc;
use tracing::debug;

/// A captured photo as PNG bytes
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedPhoto {
    png: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl EncodedPhoto {
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `data:image/png;base64,...` representation
    pub fn to_data_uri(&self) -> String {
        format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(&self.png))
    }

    /// Parse a PNG data URI
    pub fn from_data_uri(uri: &str) -> Result<Self, PhotoError> {
        let payload = uri.strip_prefix(PNG_DATA_URI_PREFIX).ok_or_else(|| {
            let head: String = uri.chars().take(24).collect();
            PhotoError::DecodingFailed(format!("not a PNG data URI: {}...", head))
        })?;
        let png = STANDARD
            .decode(payload.trim())
            .map_err(|e| PhotoError::DecodingFailed(format!("base64: {}", e)))?;

        // Only the header is needed for dimensions
        let reader = image::ImageReader::with_format(std::io::Cursor::new(&png), ImageFormat::Png);
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| PhotoError::DecodingFailed(e.to_string()))?;

        Ok(Self {
            png: Arc::from(png),
            width,
            height,
        })
    }

    /// Decode back into pixels
    pub fn decode(&self) -> Result<RgbaImage, PhotoError> {
        image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map(|img| img.to_rgba8())
            .map_err(|e| PhotoError::DecodingFailed(e.to_string()))
    }
}

impl std::fmt::Debug for EncodedPhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncodedPhoto({}x{}, {} bytes)",
            self.width,
            self.height,
            self.png.len()
        )
    }
}

/// Photo encoder
pub struct PhotoEncoder;

impl PhotoEncoder {
    /// Encode an image as PNG
    pub fn encode_png(image: &RgbaImage) -> Result<EncodedPhoto, PhotoError> {
        let mut buffer = Vec::new();
        image.write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)?;

        debug!(
            width = image.width(),
            height = image.height(),
            size = buffer.len(),
            "PNG encoding complete"
        );

        Ok(EncodedPhoto {
            png: Arc::from(buffer),
            width: image.width(),
            height: image.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_data_uri_prefix() {
        let photo = PhotoEncoder::encode_png(&RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])))
            .unwrap();
        let uri = photo.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,iVBOR"));

        let parsed = EncodedPhoto::from_data_uri(&uri).unwrap();
        assert_eq!((parsed.width(), parsed.height()), (3, 2));
        assert_eq!(parsed, photo);
    }

    #[test]
    fn test_rejects_other_media_types() {
        let err = EncodedPhoto::from_data_uri("data:image/jpeg;base64,AAAA").unwrap_err();
        assert!(matches!(err, PhotoError::DecodingFailed(_)));
    }

    #[test]
    fn test_rejects_non_png_payload() {
        let uri = format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(b"hello"));
        assert!(EncodedPhoto::from_data_uri(&uri).is_err());
    }
}
