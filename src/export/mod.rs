// SPDX-License-Identifier: GPL-3.0-only

//! Strip export
//!
//! ```text
//! Document ──lookup(id)──▶ Rasterizer ──▶ PNG encode ──▶ DownloadSink
//!                                                    └──▶ confetti (optional)
//! ```
//!
//! Export is all-or-nothing: a missing target, an empty region or an
//! undecodable photo yields [`ExportError::Render`] and no file.

pub mod confetti;
pub mod document;
pub mod raster;
pub mod sink;

pub use confetti::{ConfettiBurst, ConfettiSchedule, ParticleSink, celebrate};
pub use document::Document;
pub use raster::Rasterizer;
pub use sink::{DirectorySink, DownloadSink};

use crate::constants::PNG_DATA_URI_PREFIX;
use crate::constants::export::DEFAULT_FILENAME;
use crate::errors::{ExportError, RenderError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use std::path::PathBuf;
use tracing::{error, info};

/// A rasterized strip, encoded as PNG
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedStrip {
    png: Vec<u8>,
    width: u32,
    height: u32,
    filename: String,
}

impl ExportedStrip {
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// `data:image/png;base64,...` form, as a canvas would hand it out
    pub fn to_data_uri(&self) -> String {
        format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(&self.png))
    }
}

impl std::fmt::Debug for ExportedStrip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedStrip")
            .field("filename", &self.filename)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.png.len())
            .finish()
    }
}

/// Rasterizes mounted strips and saves them
pub struct ExportService {
    rasterizer: Rasterizer,
    filename: String,
}

impl ExportService {
    pub fn new(rasterizer: Rasterizer) -> Self {
        Self {
            rasterizer,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Override the download filename
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Rasterize the element mounted under `id` into one PNG
    pub fn export(&self, document: &Document, id: &str) -> Result<ExportedStrip, ExportError> {
        let result = self.export_inner(document, id);
        if let Err(e) = &result {
            error!(id, error = %e, "Strip export failed");
        }
        result
    }

    fn export_inner(&self, document: &Document, id: &str) -> Result<ExportedStrip, ExportError> {
        let node = document
            .get(id)
            .ok_or_else(|| RenderError::Detached(id.to_string()))?;
        let image = self.rasterizer.rasterize(node)?;

        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| ExportError::Encode(e.to_string()))?;

        info!(
            id,
            width = image.width(),
            height = image.height(),
            size = png.len(),
            "Strip exported"
        );

        Ok(ExportedStrip {
            png,
            width: image.width(),
            height: image.height(),
            filename: self.filename.clone(),
        })
    }

    /// Hand the PNG to a download sink
    pub fn save(&self, strip: &ExportedStrip, sink: &dyn DownloadSink) -> Result<PathBuf, ExportError> {
        sink.deliver(strip.filename(), strip.png_bytes())
    }

    /// Export then save; nothing is written when export fails
    pub fn export_to(
        &self,
        document: &Document,
        id: &str,
        sink: &dyn DownloadSink,
    ) -> Result<PathBuf, ExportError> {
        let strip = self.export(document, id)?;
        self.save(&strip, sink)
    }
}
