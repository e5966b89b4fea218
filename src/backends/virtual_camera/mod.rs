// SPDX-License-Identifier: GPL-3.0-only

//! Virtual camera backend
//!
//! Serves frames from a synthetic test pattern or a still image file instead
//! of a hardware device. Media access can be configured to succeed, be
//! denied, find no device, or never resolve, which covers every outcome of a
//! real permission prompt.

mod file_source;

pub use file_source::load_image_as_frame;

use crate::backends::camera::types::{BackendError, BackendResult, CameraFrame};
use crate::backends::camera::{CameraBackend, CameraStream};
use futures::future::BoxFuture;
use image::{Rgba, RgbaImage};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Color bars of the synthetic test pattern
pub const TEST_PATTERN_BARS: [[u8; 4]; 8] = [
    [255, 255, 255, 255],
    [255, 255, 0, 255],
    [0, 255, 255, 255],
    [0, 255, 0, 255],
    [255, 0, 255, 255],
    [255, 0, 0, 255],
    [0, 0, 255, 255],
    [16, 16, 16, 255],
];

/// Where virtual frames come from
#[derive(Debug, Clone)]
pub enum FrameSource {
    /// Vertical color bars, shifted by one bar on every grab
    TestPattern { width: u32, height: u32 },
    /// The same still image on every grab
    Still(Arc<RgbaImage>),
}

impl FrameSource {
    /// Serve a still image file
    pub fn from_file(path: &std::path::Path) -> BackendResult<Self> {
        let image = load_image_as_frame(path)?.to_rgba_image()?;
        Ok(FrameSource::Still(Arc::new(image)))
    }

    fn render(&self, frame_index: u64) -> RgbaImage {
        match self {
            FrameSource::TestPattern { width, height } => {
                test_pattern_frame(*width, *height, frame_index)
            }
            FrameSource::Still(image) => image.as_ref().clone(),
        }
    }
}

/// Outcome of a media access request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Access granted
    #[default]
    Granted,
    /// The user refused access
    Denied,
    /// No video input device exists
    NoDevice,
    /// The permission prompt never resolves
    Pending,
}

/// Virtual camera backend
pub struct VirtualCamera {
    source: FrameSource,
    access: AccessMode,
    ready_after: Duration,
    open_streams: Arc<AtomicUsize>,
}

impl VirtualCamera {
    /// Camera serving the synthetic test pattern
    pub fn test_pattern(width: u32, height: u32) -> Self {
        Self::new(FrameSource::TestPattern { width, height })
    }

    pub fn new(source: FrameSource) -> Self {
        Self {
            source,
            access: AccessMode::Granted,
            ready_after: Duration::ZERO,
            open_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the outcome of future access requests
    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }

    /// Delay between a stream starting and its first decoded frame
    pub fn with_ready_after(mut self, delay: Duration) -> Self {
        self.ready_after = delay;
        self
    }

    /// Number of streams whose tracks are still running
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    /// Shared counter of running streams, usable after the backend is moved
    pub fn open_streams_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open_streams)
    }
}

impl CameraBackend for VirtualCamera {
    fn name(&self) -> &str {
        "virtual"
    }

    fn request_stream(&self) -> BoxFuture<'_, BackendResult<Box<dyn CameraStream>>> {
        Box::pin(async move {
            match self.access {
                AccessMode::Granted => {}
                AccessMode::Denied => return Err(BackendError::PermissionDenied),
                AccessMode::NoDevice => {
                    return Err(BackendError::DeviceNotFound("no video input".into()));
                }
                AccessMode::Pending => {
                    warn!("Camera permission prompt pending");
                    futures::future::pending::<()>().await;
                }
            }

            self.open_streams.fetch_add(1, Ordering::SeqCst);
            info!(source = ?self.source_kind(), "Virtual camera stream started");

            let stream: Box<dyn CameraStream> = Box::new(VirtualStream {
                source: self.source.clone(),
                frame_index: 0,
                started_at: tokio::time::Instant::now(),
                ready_after: self.ready_after,
                active: true,
                open_streams: Arc::clone(&self.open_streams),
            });
            Ok(stream)
        })
    }
}

impl VirtualCamera {
    fn source_kind(&self) -> &'static str {
        match self.source {
            FrameSource::TestPattern { .. } => "test-pattern",
            FrameSource::Still(_) => "still",
        }
    }
}

struct VirtualStream {
    source: FrameSource,
    frame_index: u64,
    started_at: tokio::time::Instant,
    ready_after: Duration,
    active: bool,
    open_streams: Arc<AtomicUsize>,
}

impl CameraStream for VirtualStream {
    fn has_frame(&self) -> bool {
        self.active && self.started_at.elapsed() >= self.ready_after
    }

    fn grab_frame(&mut self) -> BackendResult<CameraFrame> {
        if !self.active {
            return Err(BackendError::StreamStopped);
        }
        let image = self.source.render(self.frame_index);
        debug!(frame = self.frame_index, "Virtual frame grabbed");
        self.frame_index += 1;
        Ok(CameraFrame::from_rgba(image))
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.open_streams.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for VirtualStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Render frame `index` of the test pattern
///
/// The bar under column 0 of frame `n` is `TEST_PATTERN_BARS[n % 8]`.
pub fn test_pattern_frame(width: u32, height: u32, index: u64) -> RgbaImage {
    let bars = TEST_PATTERN_BARS.len() as u64;
    let bar_width = (width / bars as u32).max(1);
    RgbaImage::from_fn(width, height, |x, _| {
        let bar = ((x / bar_width) as u64 + index) % bars;
        Rgba(TEST_PATTERN_BARS[bar as usize])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_denied_access_opens_nothing() {
        let camera = VirtualCamera::test_pattern(16, 8).with_access(AccessMode::Denied);
        let result = camera.request_stream().await;
        assert!(matches!(result, Err(BackendError::PermissionDenied)));
        assert_eq!(camera.open_streams(), 0);
    }

    #[tokio::test]
    async fn test_stop_releases_stream() {
        let camera = VirtualCamera::test_pattern(16, 8);
        let mut stream = camera.request_stream().await.unwrap();
        assert_eq!(camera.open_streams(), 1);

        stream.stop();
        stream.stop();
        assert_eq!(camera.open_streams(), 0);
        assert!(stream.grab_frame().is_err());
    }

    #[test]
    fn test_pattern_shifts_per_frame() {
        let first = test_pattern_frame(16, 2, 0);
        let second = test_pattern_frame(16, 2, 1);
        assert_eq!(first.get_pixel(0, 0).0, TEST_PATTERN_BARS[0]);
        assert_eq!(second.get_pixel(0, 0).0, TEST_PATTERN_BARS[1]);
    }
}
