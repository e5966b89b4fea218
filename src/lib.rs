// SPDX-License-Identifier: GPL-3.0-only

//! Photobooth - timed camera capture, filters, photo strips and PNG export
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`backends`]: Camera abstraction and the virtual camera
//! - [`filters`]: Named pixel filters with declarative and manual backends
//! - [`pipelines`]: Frame → mirrored, filtered, PNG-encoded photo
//! - [`capture`]: Countdown, single and auto capture, collection and selection
//! - [`storage`]: Handoff slot carrying chosen photos to composition
//! - [`composition`]: Strip layout from photos plus style choices
//! - [`export`]: Rasterization, PNG download and confetti
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```no_run
//! use photobooth::backends::virtual_camera::VirtualCamera;
//! use photobooth::capture::CaptureController;
//!
//! # async fn demo() {
//! let controller = CaptureController::new(Box::new(VirtualCamera::test_pattern(640, 480)));
//! controller.start_camera().await;
//! controller.auto_capture().await;
//! assert_eq!(controller.snapshot().photo_count, 4);
//! # }
//! ```

pub mod backends;
pub mod capture;
pub mod composition;
pub mod config;
pub mod constants;
pub mod errors;
pub mod export;
pub mod filters;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use capture::{CaptureController, CaptureSnapshot, CaptureState};
pub use composition::{Caption, StripComposition, StripStyle};
pub use config::Config;
pub use constants::TimerPreset;
pub use errors::{AppError, AppResult};
pub use filters::{FilterType, apply_filter};
