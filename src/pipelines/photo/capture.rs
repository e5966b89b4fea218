// SPDX-License-Identifier: GPL-3.0-only

//! Single frame grab from the bound camera session

use crate::backends::camera::CameraSession;
use crate::backends::camera::types::{BackendError, CameraFrame};
use crate::errors::PhotoError;
use tracing::debug;

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Grab exactly one frame from the session
    ///
    /// Fails with [`PhotoError::NoFrameAvailable`] when no session is bound or
    /// the stream has not decoded a frame yet.
    pub fn grab(session: Option<&mut CameraSession>) -> Result<CameraFrame, PhotoError> {
        let session = session.ok_or(PhotoError::NoFrameAvailable)?;

        let frame = session.grab_frame().map_err(|e| match e {
            BackendError::NotReady | BackendError::StreamStopped => PhotoError::NoFrameAvailable,
            other => PhotoError::CaptureFailed(other.to_string()),
        })?;

        debug!(
            session = %session.id(),
            width = frame.width,
            height = frame.height,
            "Frame grabbed"
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::CameraBackend;
    use crate::backends::virtual_camera::VirtualCamera;
    use std::time::Duration;

    #[test]
    fn test_no_session_has_no_frame() {
        assert_eq!(
            PhotoCapture::grab(None).unwrap_err(),
            PhotoError::NoFrameAvailable
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_not_ready_until_first_frame() {
        let camera = VirtualCamera::test_pattern(8, 4).with_ready_after(Duration::from_millis(500));
        let mut session = CameraSession::new(camera.request_stream().await.unwrap());

        assert_eq!(
            PhotoCapture::grab(Some(&mut session)).unwrap_err(),
            PhotoError::NoFrameAvailable
        );

        tokio::time::sleep(Duration::from_millis(500)).await;
        let frame = PhotoCapture::grab(Some(&mut session)).unwrap();
        assert_eq!((frame.width, frame.height), (8, 4));
    }
}
