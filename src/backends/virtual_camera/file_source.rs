// SPDX-License-Identifier: GPL-3.0-only

//! Still image files as a virtual camera source

use crate::backends::camera::types::{BackendError, BackendResult, CameraFrame};
use std::path::Path;
use tracing::info;

/// Load an image file as an RGBA camera frame
pub fn load_image_as_frame(path: &Path) -> BackendResult<CameraFrame> {
    info!(path = %path.display(), "Loading image file");

    let img = image::open(path).map_err(|e| {
        BackendError::Other(format!("Failed to load image '{}': {}", path.display(), e))
    })?;

    let rgba = img.to_rgba8();
    info!(width = rgba.width(), height = rgba.height(), "Image loaded successfully");

    Ok(CameraFrame::from_rgba(rgba))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_image_as_frame(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(BackendError::Other(_))));
    }

    #[test]
    fn test_png_round_trip_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        image::RgbaImage::from_pixel(5, 3, image::Rgba([9, 8, 7, 255]))
            .save(&path)
            .unwrap();

        let frame = load_image_as_frame(&path).unwrap();
        assert_eq!((frame.width, frame.height), (5, 3));
        assert_eq!(frame.stride, 20);
    }
}
