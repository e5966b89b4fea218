// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the photobooth

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Caption input errors
    Caption(CaptionError),
    /// Handoff storage errors
    Storage(StorageError),
    /// Strip export errors
    Export(ExportError),
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// User or platform refused camera access
    PermissionDenied,
    /// No camera devices found
    NoCameraFound,
    /// Camera initialization failed
    InitializationFailed(String),
    /// Camera disconnected during operation
    Disconnected,
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// No camera session is bound, or it has not decoded a frame yet
    NoFrameAvailable,
    /// Frame grab failed
    CaptureFailed(String),
    /// PNG encoding failed
    EncodingFailed(String),
    /// Data URI could not be decoded back into an image
    DecodingFailed(String),
}

/// Caption input errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionError {
    /// Caption exceeds the character limit
    TooLong { len: usize, max: usize },
}

/// Handoff storage errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Underlying read/write failed
    Io(String),
    /// Stored value is not a JSON array of data URIs
    Malformed(String),
}

/// Why a composition could not be rasterized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The export target is not mounted in the document
    Detached(String),
    /// The target has zero width or height
    EmptyRegion { width: u32, height: u32 },
    /// A photo or template image could not be decoded
    Decode(String),
}

/// Strip export errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Rasterization failed; no file was produced
    Render(RenderError),
    /// PNG encoding of the rasterized strip failed
    Encode(String),
    /// Writing the file failed
    Save(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Caption(e) => write!(f, "Caption error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Export(e) => write!(f, "Export error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera permission denied"),
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::Disconnected => write!(f, "Camera disconnected"),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
        }
    }
}

impl fmt::Display for CaptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptionError::TooLong { len, max } => {
                write!(f, "Caption is {} characters, maximum is {}", len, max)
            }
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "I/O error: {}", msg),
            StorageError::Malformed(msg) => write!(f, "Malformed handoff value: {}", msg),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Detached(id) => write!(f, "Element '{}' is not mounted", id),
            RenderError::EmptyRegion { width, height } => {
                write!(f, "Cannot rasterize a {}x{} region", width, height)
            }
            RenderError::Decode(msg) => write!(f, "Image decode failed: {}", msg),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Render(e) => write!(f, "Export failed: {}", e),
            ExportError::Encode(msg) => write!(f, "Export failed: PNG encoding: {}", msg),
            ExportError::Save(msg) => write!(f, "Export failed: save: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PhotoError {}
impl std::error::Error for CaptionError {}
impl std::error::Error for StorageError {}
impl std::error::Error for RenderError {}
impl std::error::Error for ExportError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<CaptionError> for AppError {
    fn from(err: CaptionError) -> Self {
        AppError::Caption(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<RenderError> for ExportError {
    fn from(err: RenderError) -> Self {
        ExportError::Render(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Malformed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}
