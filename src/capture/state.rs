// SPDX-License-Identifier: GPL-3.0-only

//! Capture state machine and the snapshot published to observers

use crate::errors::CameraError;

/// Where the capture controller is in its cycle
///
/// ```text
/// Idle ─▶ Countdown(n) ─▶ … ─▶ Countdown(0) ─▶ Capturing ─▶ Idle
///              │                                  │
///              └──────────── Cancelled ◀──────────┘ ─▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    /// Whole seconds left before the grab
    Countdown(u32),
    /// Between the end of the countdown and the recorded photo
    Capturing,
    /// Transient state while a cancel or retake resets the controller
    Cancelled,
}

impl CaptureState {
    pub fn countdown(&self) -> Option<u32> {
        match self {
            CaptureState::Countdown(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, CaptureState::Idle)
    }
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "idle"),
            CaptureState::Countdown(n) => write!(f, "countdown {}", n),
            CaptureState::Capturing => write!(f, "capturing"),
            CaptureState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Everything a UI needs to render the capture screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSnapshot {
    pub state: CaptureState,
    /// Value shown over the preview, present only during a countdown
    pub countdown: Option<u32>,
    /// A single or auto capture is in progress
    pub capturing: bool,
    pub photo_count: usize,
    pub limit: usize,
    pub selection_count: usize,
    /// Short-lived flag raised right after each grab
    pub flash: bool,
    /// A camera session is bound and has decoded a frame
    pub camera_ready: bool,
    /// Why the last `start_camera` failed, if it did
    pub camera_error: Option<CameraError>,
}

impl Default for CaptureSnapshot {
    fn default() -> Self {
        Self {
            state: CaptureState::Idle,
            countdown: None,
            capturing: false,
            photo_count: 0,
            limit: crate::constants::capture::DEFAULT_PHOTO_LIMIT,
            selection_count: 0,
            flash: false,
            camera_ready: false,
            camera_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_value() {
        assert_eq!(CaptureState::Countdown(3).countdown(), Some(3));
        assert_eq!(CaptureState::Countdown(0).countdown(), Some(0));
        assert_eq!(CaptureState::Capturing.countdown(), None);
        assert!(CaptureState::default().is_idle());
    }
}
