// SPDX-License-Identifier: GPL-3.0-only

//! Timed, cancellable capture into a bounded photo collection

pub mod collection;
pub mod controller;
pub mod state;

pub use collection::{PhotoCollection, SelectionSet, clamp_limit};
pub use controller::CaptureController;
pub use state::{CaptureSnapshot, CaptureState};
