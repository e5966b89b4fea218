// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for camera capture
//!
//! - [`camera`]: the backend/stream traits and the session the controller owns
//! - [`virtual_camera`]: a device-free backend serving test patterns or stills

pub mod camera;
pub mod virtual_camera;
