// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │ Capture Controller  │  ← owns at most one CameraSession
//! └──────────┬──────────┘
//!            │ request_stream()
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend      │  ← media access (may be denied or hang)
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraStream       │  ← frame grabs, track shutdown
//! └─────────────────────┘
//! ```

pub mod types;

pub use types::*;

use futures::future::BoxFuture;
use tracing::{debug, info};
use uuid::Uuid;

/// Media access for video-only camera streams
///
/// `request_stream` is the one asynchronous step of the capture pipeline; no
/// timeout is applied to it, so a backend waiting on a permission prompt
/// simply keeps the returned future pending.
pub trait CameraBackend: Send + Sync {
    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Request a video-only stream
    fn request_stream(&self) -> BoxFuture<'_, BackendResult<Box<dyn CameraStream>>>;
}

/// A live video stream
pub trait CameraStream: Send {
    /// Whether the stream has decoded at least one frame
    fn has_frame(&self) -> bool;

    /// Grab the most recent frame
    fn grab_frame(&mut self) -> BackendResult<CameraFrame>;

    /// Stop all tracks and release the device
    fn stop(&mut self);

    /// Whether tracks are still running
    fn is_active(&self) -> bool;
}

/// The stream currently bound to the capture controller
///
/// Dropping a session stops its tracks, so replacing the controller's session
/// never leaves a device handle open.
pub struct CameraSession {
    id: Uuid,
    stream: Box<dyn CameraStream>,
}

impl CameraSession {
    pub fn new(stream: Box<dyn CameraStream>) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, "Camera session created");
        Self { id, stream }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Readiness flag: at least one decoded frame is available
    pub fn is_ready(&self) -> bool {
        self.stream.is_active() && self.stream.has_frame()
    }

    pub fn grab_frame(&mut self) -> BackendResult<CameraFrame> {
        if !self.stream.is_active() {
            return Err(BackendError::StreamStopped);
        }
        if !self.stream.has_frame() {
            return Err(BackendError::NotReady);
        }
        self.stream.grab_frame()
    }

    /// Stop all tracks; idempotent
    pub fn stop(&mut self) {
        if self.stream.is_active() {
            info!(session = %self.id, "Stopping camera tracks");
            self.stream.stop();
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("id", &self.id)
            .field("ready", &self.is_ready())
            .finish()
    }
}
