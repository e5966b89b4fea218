// SPDX-License-Identifier: GPL-3.0-only

//! Post-processing of grabbed frames: mirroring and filtering

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use crate::filters::FilterEngine;
use image::RgbaImage;
use tracing::debug;

/// Post-processing configuration
#[derive(Debug, Clone)]
pub struct PostProcessingConfig {
    /// Filter name from the catalog; unknown names are the identity
    pub filter: String,
    /// Flip horizontally so the photo matches the selfie preview
    pub mirrored: bool,
}

impl Default for PostProcessingConfig {
    fn default() -> Self {
        Self {
            filter: "None".to_string(),
            mirrored: true,
        }
    }
}

/// Post-processor for grabbed frames
pub struct PostProcessor {
    config: PostProcessingConfig,
    engine: FilterEngine,
}

impl PostProcessor {
    pub fn new(config: PostProcessingConfig, engine: FilterEngine) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &PostProcessingConfig {
        &self.config
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.config.filter = filter.into();
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.config.mirrored = mirrored;
    }

    /// Mirror and filter a frame
    pub fn process(&self, frame: &CameraFrame) -> Result<RgbaImage, PhotoError> {
        let mut image = frame
            .to_rgba_image()
            .map_err(|e| PhotoError::CaptureFailed(e.to_string()))?;

        if self.config.mirrored {
            image::imageops::flip_horizontal_in_place(&mut image);
        }

        self.engine.apply_in_place(&mut image, &self.config.filter);

        debug!(
            filter = %self.config.filter,
            mirrored = self.config.mirrored,
            "Post-processing complete"
        );
        Ok(image)
    }
}
