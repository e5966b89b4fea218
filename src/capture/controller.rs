// SPDX-License-Identifier: GPL-3.0-only

//! Capture controller
//!
//! Owns the camera session, runs countdowns and grabs, and keeps the photo
//! collection and selection. Every state change is published as a
//! [`CaptureSnapshot`] on a `watch` channel.
//!
//! Cancellation is cooperative. `cancel`, `retake` and `set_limit` bump the
//! capture epoch; a running countdown compares its epoch before every tick
//! and before the grab, and stops as soon as it is stale. The grab itself
//! (epoch check, frame grab, processing, encoding, append) happens under one
//! lock acquisition with no suspension point.

use super::collection::{PhotoCollection, SelectionSet};
use super::state::{CaptureSnapshot, CaptureState};
use crate::backends::camera::{CameraBackend, CameraSession};
use crate::config::Config;
use crate::constants::capture::{
    COUNTDOWN_TICK, DEFAULT_PHOTO_LIMIT, FLASH_DURATION, SETTLE_AFTER_GRAB, SETTLE_BEFORE_GRAB,
};
use crate::errors::{CameraError, PhotoError, StorageError};
use crate::filters::FilterEngine;
use crate::pipelines::photo::{EncodedPhoto, PhotoPipeline, PostProcessingConfig};
use crate::storage::{self, HandoffStore};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Why a countdown cycle ended early
enum Stop {
    Cancelled,
    Failed(PhotoError),
}

struct Inner {
    session: Option<CameraSession>,
    camera_error: Option<CameraError>,
    pipeline: PhotoPipeline,
    photos: PhotoCollection,
    selection: SelectionSet,
    state: CaptureState,
    capturing: bool,
    timer_seconds: u32,
    epoch: u64,
    flash: bool,
    flash_seq: u64,
}

impl Inner {
    fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            state: self.state,
            countdown: self.state.countdown(),
            capturing: self.capturing,
            photo_count: self.photos.len(),
            limit: self.photos.limit(),
            selection_count: self.selection.len(),
            flash: self.flash,
            camera_ready: self.session.as_ref().is_some_and(CameraSession::is_ready),
            camera_error: self.camera_error.clone(),
        }
    }
}

struct Shared {
    backend: Box<dyn CameraBackend>,
    inner: Mutex<Inner>,
    snapshots: watch::Sender<CaptureSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, inner: &Inner) {
        self.snapshots.send_replace(inner.snapshot());
    }

    /// Claim the capturing flag; `None` when a capture is already running
    fn begin(&self, clear: bool) -> Option<u64> {
        let mut inner = self.lock();
        if inner.capturing {
            debug!("Capture already in progress, ignoring request");
            return None;
        }
        inner.capturing = true;
        if clear {
            inner.photos.clear();
            inner.selection.clear();
        }
        self.publish(&inner);
        Some(inner.epoch)
    }

    fn enter_state(&self, epoch: u64, state: CaptureState) -> Result<(), Stop> {
        let mut inner = self.lock();
        if inner.epoch != epoch {
            return Err(Stop::Cancelled);
        }
        inner.state = state;
        self.publish(&inner);
        Ok(())
    }

    /// Grab, process, encode and append as one step
    fn grab_and_record(&self, epoch: u64) -> Result<u64, Stop> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if inner.epoch != epoch {
            return Err(Stop::Cancelled);
        }

        let photo = inner
            .pipeline
            .capture(inner.session.as_mut())
            .map_err(Stop::Failed)?;

        if inner.photos.push(photo) {
            debug!(count = inner.photos.len(), limit = inner.photos.limit(), "Photo recorded");
        } else {
            debug!(limit = inner.photos.limit(), "Collection full, photo dropped");
        }

        inner.flash = true;
        inner.flash_seq += 1;
        self.publish(inner);
        Ok(inner.flash_seq)
    }

    /// Release the capturing flag unless a cancel already did
    fn finish(&self, epoch: u64) {
        let mut inner = self.lock();
        if inner.epoch != epoch {
            return;
        }
        inner.capturing = false;
        inner.state = CaptureState::Idle;
        self.publish(&inner);
    }

    /// Invalidate any running capture and return to Idle
    fn interrupt(&self, inner: &mut Inner) {
        inner.epoch += 1;
        if inner.capturing || !inner.state.is_idle() {
            info!(state = %inner.state, "Capture cancelled");
            inner.state = CaptureState::Cancelled;
            self.publish(inner);
        }
        inner.capturing = false;
        inner.state = CaptureState::Idle;
        self.publish(inner);
    }

    fn timer_seconds(&self) -> u32 {
        self.lock().timer_seconds
    }

    fn is_full(&self) -> bool {
        self.lock().photos.is_full()
    }

    fn clear_flash(&self, seq: u64) {
        let mut inner = self.lock();
        if inner.flash && inner.flash_seq == seq {
            inner.flash = false;
            self.publish(&inner);
        }
    }

    fn replace_session(&self, session: Option<CameraSession>) {
        let mut inner = self.lock();
        if let Some(mut previous) = std::mem::replace(&mut inner.session, session) {
            previous.stop();
        }
        self.publish(&inner);
    }
}

/// Camera session lifecycle, timed capture, collection and selection
///
/// Cloning yields another handle to the same controller.
#[derive(Clone)]
pub struct CaptureController {
    shared: Arc<Shared>,
}

impl CaptureController {
    /// Controller with default settings: 3 s timer, 4 photos, mirrored, no filter
    pub fn new(backend: Box<dyn CameraBackend>) -> Self {
        Self::with_config(backend, &Config::default())
    }

    pub fn with_config(backend: Box<dyn CameraBackend>, config: &Config) -> Self {
        let pipeline = PhotoPipeline::with_config(
            PostProcessingConfig {
                filter: config.filter.clone(),
                mirrored: config.mirrored,
            },
            FilterEngine::default(),
        );
        let limit = if config.photo_limit == 0 {
            DEFAULT_PHOTO_LIMIT
        } else {
            config.photo_limit
        };

        let inner = Inner {
            session: None,
            camera_error: None,
            pipeline,
            photos: PhotoCollection::new(limit),
            selection: SelectionSet::new(),
            state: CaptureState::Idle,
            capturing: false,
            timer_seconds: config.timer_seconds,
            epoch: 0,
            flash: false,
            flash_seq: 0,
        };
        let (snapshots, _) = watch::channel(inner.snapshot());

        debug!(
            backend = backend.name(),
            limit = inner.photos.limit(),
            timer = inner.timer_seconds,
            "Capture controller created"
        );

        Self {
            shared: Arc::new(Shared {
                backend,
                inner: Mutex::new(inner),
                snapshots,
            }),
        }
    }

    /// Request a video-only stream and bind it
    ///
    /// Any previously bound stream is stopped first. Permission and device
    /// failures are logged and recorded in the snapshot; the controller stays
    /// Idle without a session.
    pub async fn start_camera(&self) {
        self.shared.replace_session(None);

        info!(backend = self.shared.backend.name(), "Requesting camera stream");
        let result = self.shared.backend.request_stream().await;

        match result {
            Ok(stream) => {
                let session = CameraSession::new(stream);
                info!(session = %session.id(), "Camera started");
                self.set_camera_error(None);
                self.shared.replace_session(Some(session));
            }
            Err(e) => {
                let err = CameraError::from(e);
                error!(error = %err, "Failed to start camera");
                self.set_camera_error(Some(err));
            }
        }
    }

    fn set_camera_error(&self, err: Option<CameraError>) {
        let mut inner = self.shared.lock();
        inner.camera_error = err;
        self.shared.publish(&inner);
    }

    /// Stop all tracks of the current session
    pub fn stop_camera(&self) {
        self.shared.replace_session(None);
    }

    pub fn has_session(&self) -> bool {
        self.shared.lock().session.is_some()
    }

    /// Count down, grab one frame, and append it if the collection has room
    ///
    /// Does nothing while another capture is running.
    pub async fn capture_one(&self) {
        let Some(epoch) = self.shared.begin(false) else {
            return;
        };

        match self.countdown_and_grab(epoch).await {
            Ok(()) => {}
            Err(Stop::Cancelled) => return,
            Err(Stop::Failed(e)) => warn!(error = %e, "Capture failed"),
        }
        self.shared.finish(epoch);
    }

    /// Clear the collection, then capture until it reaches the limit
    ///
    /// Does nothing while another capture is running. Cancellation stops the
    /// loop and keeps the photos taken so far.
    pub async fn auto_capture(&self) {
        let Some(epoch) = self.shared.begin(true) else {
            return;
        };
        info!(limit = self.limit(), "Auto capture started");

        loop {
            match self.countdown_and_grab(epoch).await {
                Ok(()) => {}
                Err(Stop::Cancelled) => return,
                Err(Stop::Failed(e)) => {
                    warn!(error = %e, "Auto capture stopped");
                    break;
                }
            }
            if self.shared.is_full() {
                info!("Auto capture complete");
                break;
            }
            tokio::time::sleep(SETTLE_AFTER_GRAB).await;
        }
        self.shared.finish(epoch);
    }

    async fn countdown_and_grab(&self, epoch: u64) -> Result<(), Stop> {
        let timer = self.shared.timer_seconds();
        for remaining in (0..=timer).rev() {
            self.shared.enter_state(epoch, CaptureState::Countdown(remaining))?;
            if remaining > 0 {
                debug!(remaining, "Countdown tick");
                tokio::time::sleep(COUNTDOWN_TICK).await;
            }
        }

        self.shared.enter_state(epoch, CaptureState::Capturing)?;
        tokio::time::sleep(SETTLE_BEFORE_GRAB).await;

        let seq = self.shared.grab_and_record(epoch)?;
        self.schedule_flash_clear(seq);
        Ok(())
    }

    fn schedule_flash_clear(&self, seq: u64) {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        tokio::spawn(async move {
            tokio::time::sleep(FLASH_DURATION).await;
            if let Some(shared) = shared.upgrade() {
                shared.clear_flash(seq);
            }
        });
    }

    /// Stop any running capture and return to Idle, keeping photos
    pub fn cancel(&self) {
        let mut inner = self.shared.lock();
        self.shared.interrupt(&mut inner);
    }

    /// Cancel, then discard all photos and the selection
    pub fn retake(&self) {
        let mut inner = self.shared.lock();
        self.shared.interrupt(&mut inner);
        inner.photos.clear();
        inner.selection.clear();
        inner.flash = false;
        self.shared.publish(&inner);
        debug!("Retake: photos cleared");
    }

    /// Change the photo limit (clamped to 1..=8)
    ///
    /// Cancels an in-flight capture and clears photos and selection.
    pub fn set_limit(&self, limit: usize) {
        let mut inner = self.shared.lock();
        self.shared.interrupt(&mut inner);
        inner.photos.set_limit(limit);
        inner.selection.clear();
        self.shared.publish(&inner);
        info!(limit = inner.photos.limit(), "Photo limit changed");
    }

    pub fn limit(&self) -> usize {
        self.shared.lock().photos.limit()
    }

    /// Select the filter applied to future grabs
    pub fn set_filter(&self, name: impl Into<String>) {
        let name = name.into();
        debug!(filter = %name, "Filter changed");
        self.shared.lock().pipeline.set_filter(name);
    }

    pub fn filter(&self) -> String {
        self.shared.lock().pipeline.processing_config().filter.clone()
    }

    pub fn set_mirrored(&self, mirrored: bool) {
        self.shared.lock().pipeline.set_mirrored(mirrored);
    }

    /// Countdown length for future cycles
    pub fn set_timer_seconds(&self, seconds: u32) {
        debug!(seconds, "Timer changed");
        self.shared.lock().timer_seconds = seconds;
    }

    pub fn timer_seconds(&self) -> u32 {
        self.shared.timer_seconds()
    }

    /// Toggle a photo's membership in the selection
    ///
    /// Returns whether the photo is selected afterwards.
    pub fn toggle_selection(&self, index: usize) -> bool {
        let mut guard = self.shared.lock();
        let inner = &mut *guard;
        let selected = inner.selection.toggle(index, inner.photos.len());
        self.shared.publish(inner);
        selected
    }

    pub fn photos(&self) -> Vec<EncodedPhoto> {
        self.shared.lock().photos.as_slice().to_vec()
    }

    /// Selected photos, in selection order
    pub fn selected_photos(&self) -> Vec<EncodedPhoto> {
        let inner = self.shared.lock();
        inner.selection.resolve(&inner.photos)
    }

    /// Write the selection, or every photo when nothing is selected, to the
    /// handoff slot
    pub fn hand_off(&self, store: &dyn HandoffStore) -> Result<usize, StorageError> {
        let photos = {
            let inner = self.shared.lock();
            if inner.selection.is_empty() {
                inner.photos.as_slice().to_vec()
            } else {
                inner.selection.resolve(&inner.photos)
            }
        };
        storage::save_photos(store, &photos)?;
        Ok(photos.len())
    }

    pub fn subscribe(&self) -> watch::Receiver<CaptureSnapshot> {
        self.shared.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        self.shared.lock().snapshot()
    }
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("backend", &self.shared.backend.name())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
