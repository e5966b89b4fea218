// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use image::RgbaImage;
use std::sync::Arc;
use std::time::Instant;

/// One still frame grabbed from a camera stream
///
/// Pixels are tightly packed RGBA8 (`stride == width * 4`).
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, shared so frames can be passed around without copying
    pub data: Arc<[u8]>,
    /// Row stride in bytes
    pub stride: u32,
    /// Timestamp when frame was captured
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Wrap an RGBA image as a frame
    pub fn from_rgba(image: RgbaImage) -> Self {
        let width = image.width();
        let height = image.height();
        Self {
            width,
            height,
            data: Arc::from(image.into_raw().into_boxed_slice()),
            stride: width * 4,
            captured_at: Instant::now(),
        }
    }

    /// Copy the frame into an owned RGBA image
    pub fn to_rgba_image(&self) -> BackendResult<RgbaImage> {
        let row_bytes = self.width as usize * 4;
        let expected = row_bytes * self.height as usize;

        let pixels = if self.stride as usize == row_bytes {
            self.data.get(..expected).map(|d| d.to_vec())
        } else {
            // Strip row padding
            let mut packed = Vec::with_capacity(expected);
            for row in 0..self.height as usize {
                let start = row * self.stride as usize;
                match self.data.get(start..start + row_bytes) {
                    Some(slice) => packed.extend_from_slice(slice),
                    None => break,
                }
            }
            (packed.len() == expected).then_some(packed)
        };

        pixels
            .and_then(|p| RgbaImage::from_raw(self.width, self.height, p))
            .ok_or_else(|| {
                BackendError::Other(format!(
                    "Frame data too small for {}x{} (stride {}, {} bytes)",
                    self.width,
                    self.height,
                    self.stride,
                    self.data.len()
                ))
            })
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .field("stride", &self.stride)
            .finish()
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The user or platform refused camera access
    PermissionDenied,
    /// Camera device not found
    DeviceNotFound(String),
    /// The stream was stopped
    StreamStopped,
    /// The stream has not decoded a frame yet
    NotReady,
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::PermissionDenied => write!(f, "Permission denied"),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::StreamStopped => write!(f, "Stream stopped"),
            BackendError::NotReady => write!(f, "Stream has no decoded frame yet"),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<BackendError> for crate::errors::CameraError {
    fn from(err: BackendError) -> Self {
        use crate::errors::CameraError;
        match err {
            BackendError::PermissionDenied => CameraError::PermissionDenied,
            BackendError::DeviceNotFound(_) => CameraError::NoCameraFound,
            BackendError::StreamStopped => CameraError::Disconnected,
            other => CameraError::InitializationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_stride_is_repacked() {
        // 2x2 frame with 4 bytes of padding per row
        let mut data = Vec::new();
        data.extend_from_slice(&[1, 1, 1, 255, 2, 2, 2, 255, 0, 0, 0, 0]);
        data.extend_from_slice(&[3, 3, 3, 255, 4, 4, 4, 255, 0, 0, 0, 0]);
        let frame = CameraFrame {
            width: 2,
            height: 2,
            data: Arc::from(data),
            stride: 12,
            captured_at: Instant::now(),
        };

        let image = frame.to_rgba_image().unwrap();
        assert_eq!(image.get_pixel(1, 0).0, [2, 2, 2, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [3, 3, 3, 255]);
    }

    #[test]
    fn test_truncated_frame_is_rejected() {
        let frame = CameraFrame {
            width: 4,
            height: 4,
            data: Arc::from(vec![0u8; 10]),
            stride: 16,
            captured_at: Instant::now(),
        };
        assert!(frame.to_rgba_image().is_err());
    }
}
