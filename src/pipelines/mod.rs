// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ EncodedPhoto │
//! │   (RGBA)     │     │  - Mirror         │     │ (PNG / URI)  │
//! │              │     │  - Filter         │     │              │
//! │              │     │  - PNG encoding   │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! - [`photo`]: turns one grabbed frame into an encoded photo

pub mod photo;
