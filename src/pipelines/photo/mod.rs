// SPDX-License-Identifier: GPL-3.0-only

//! Photo pipeline
//!
//! ```text
//! Camera Session → Capture → Post-Processing → Encoding → EncodedPhoto
//! ```
//!
//! 1. **Capture**: grab exactly one frame from the bound session
//! 2. **Post-Processing**: horizontal mirror and the selected filter
//! 3. **Encoding**: PNG bytes plus their data URI form
//!
//! The stages are synchronous. The capture controller runs grab, process,
//! encode and append as one step with no suspension point in between.

pub mod capture;
pub mod encoding;
pub mod processing;

pub use capture::PhotoCapture;
pub use encoding::{EncodedPhoto, PhotoEncoder};
pub use processing::{PostProcessingConfig, PostProcessor};

use crate::backends::camera::CameraSession;
use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use crate::filters::FilterEngine;
use tracing::info;

/// Complete frame → photo pipeline
pub struct PhotoPipeline {
    post_processor: PostProcessor,
}

impl PhotoPipeline {
    /// Create a pipeline with default settings (mirrored, no filter)
    pub fn new() -> Self {
        Self::with_config(PostProcessingConfig::default(), FilterEngine::default())
    }

    /// Create a pipeline with custom settings
    pub fn with_config(processing_config: PostProcessingConfig, engine: FilterEngine) -> Self {
        Self {
            post_processor: PostProcessor::new(processing_config, engine),
        }
    }

    pub fn processing_config(&self) -> &PostProcessingConfig {
        self.post_processor.config()
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.post_processor.set_filter(filter);
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.post_processor.set_mirrored(mirrored);
    }

    /// Process and encode an already grabbed frame
    pub fn process_frame(&self, frame: &CameraFrame) -> Result<EncodedPhoto, PhotoError> {
        let image = self.post_processor.process(frame)?;
        PhotoEncoder::encode_png(&image)
    }

    /// Grab one frame from the session, then process and encode it
    pub fn capture(&self, session: Option<&mut CameraSession>) -> Result<EncodedPhoto, PhotoError> {
        let frame = PhotoCapture::grab(session)?;
        let photo = self.process_frame(&frame)?;

        info!(
            width = photo.width(),
            height = photo.height(),
            filter = %self.post_processor.config().filter,
            "Photo captured"
        );
        Ok(photo)
    }
}

impl Default for PhotoPipeline {
    fn default() -> Self {
        Self::new()
    }
}
