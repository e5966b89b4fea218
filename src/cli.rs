// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Shooting a session against the virtual camera
//! - Composing and exporting the handed-off photos as a strip
//! - Listing the filter catalog

use chrono::Local;
use photobooth::backends::virtual_camera::{FrameSource, VirtualCamera};
use photobooth::capture::CaptureController;
use photobooth::composition::{
    Caption, Color, CompositionRenderer, StripComposition, StripStyle, StripTemplate,
    TemplateLibrary,
};
use photobooth::constants::export::STRIP_ELEMENT_ID;
use photobooth::errors::{AppError, CameraError};
use photobooth::export::{
    ConfettiBurst, DirectorySink, Document, ExportService, ParticleSink, Rasterizer, celebrate,
};
use photobooth::filters::FilterType;
use photobooth::{Config, TimerPreset};
use photobooth::storage::{self, FileStore};
use std::path::PathBuf;

/// Test pattern size when no source image is given
const TEST_PATTERN_SIZE: (u32, u32) = (640, 480);

pub struct ShootOptions {
    pub limit: Option<usize>,
    pub timer: Option<u32>,
    pub filter: Option<String>,
    pub no_mirror: bool,
    pub source: Option<PathBuf>,
    pub select: Vec<usize>,
}

pub struct ComposeOptions {
    pub background: Option<String>,
    pub template: Option<String>,
    pub caption: Option<String>,
    pub font_color: Option<String>,
    pub date: bool,
    pub rounded: bool,
    pub output: Option<PathBuf>,
    pub confetti: bool,
}

/// Run an auto-capture session and hand the photos off
pub fn shoot(mut config: Config, options: ShootOptions) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(limit) = options.limit {
        config.photo_limit = limit;
    }
    if let Some(timer) = options.timer {
        config.timer_seconds = timer;
    }
    if let Some(filter) = options.filter {
        if FilterType::from_name(&filter).is_none() {
            println!("Unknown filter '{}', photos will be unfiltered", filter);
        }
        config.filter = filter;
    }
    if options.no_mirror {
        config.mirrored = false;
    }

    let source = match &options.source {
        Some(path) => FrameSource::from_file(path).map_err(CameraError::from)?,
        None => FrameSource::TestPattern {
            width: TEST_PATTERN_SIZE.0,
            height: TEST_PATTERN_SIZE.1,
        },
    };

    // A fresh session starts with an empty handoff slot
    let store = FileStore::new(&config.handoff_dir);
    storage::clear_photos(&store)?;

    let select = options.select;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let controller = CaptureController::with_config(Box::new(VirtualCamera::new(source)), &config);
        controller.start_camera().await;
        if let Some(err) = controller.snapshot().camera_error {
            return Err(AppError::from(err).into());
        }

        let seconds = controller.timer_seconds();
        let timer = match TimerPreset::from_seconds(seconds) {
            Some(preset) => preset.display_name().to_string(),
            None => format!("{}s countdown", seconds),
        };
        println!(
            "Taking {} photos, {}, filter {}",
            controller.limit(),
            timer,
            controller.filter()
        );

        let mut rx = controller.subscribe();
        let progress = tokio::spawn(async move {
            let mut last_countdown = None;
            let mut last_count = 0;
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update().clone();
                if let Some(n) = snapshot.countdown
                    && n > 0
                    && last_countdown != Some(n)
                {
                    println!("  {}...", n);
                }
                last_countdown = snapshot.countdown;
                if snapshot.photo_count > last_count {
                    println!("  Click! ({}/{})", snapshot.photo_count, snapshot.limit);
                }
                last_count = snapshot.photo_count;
            }
        });

        controller.auto_capture().await;

        for index in select {
            if !controller.toggle_selection(index) {
                println!("Photo {} not selected", index);
            }
        }
        let count = controller.hand_off(&store)?;

        controller.stop_camera();
        drop(controller);
        let _ = progress.await;

        println!("Handed off {} photos to {}", count, store.dir().display());
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// Compose the handed-off photos into a strip and export it
pub fn compose(config: Config, options: ComposeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(&config.handoff_dir);
    let photos = storage::load_photos(&store)?;
    if photos.is_empty() {
        println!("No photos handed off yet, run 'photobooth shoot' first");
    }

    let mut style = StripStyle::default();
    if let Some(background) = &options.background {
        style.background = parse_color(background)?;
    }
    if let Some(name) = &options.template {
        style.template = StripTemplate::from_name(name)
            .ok_or_else(|| AppError::Other(format!("Unknown template '{}'", name)))?;
    }
    if let Some(text) = options.caption {
        style.caption = Caption::new(text)?;
    }
    if let Some(color) = &options.font_color {
        style.font_color = parse_color(color)?;
    }
    style.show_date = options.date;
    style.rounded = options.rounded;

    let composition = StripComposition::new(photos, style);
    let renderer = CompositionRenderer::new(TemplateLibrary::new(&config.template_dir));
    let mut document = Document::new();
    document.mount(
        STRIP_ELEMENT_ID,
        renderer.render(&composition, Local::now().date_naive()),
    );

    let service = ExportService::new(Rasterizer::new(config.font_path.as_deref()));
    let output_dir = options.output.unwrap_or(config.output_dir);
    let path = service.export_to(&document, STRIP_ELEMENT_ID, &DirectorySink::new(output_dir))?;
    println!("Strip saved: {}", path.display());

    if options.confetti {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(celebrate(TerminalConfetti))?;
    }
    Ok(())
}

/// List the filter catalog
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    for filter in FilterType::ALL {
        println!("  {:<8} {}", filter.name(), filter.expression());
    }
    Ok(())
}

fn parse_color(value: &str) -> Result<Color, AppError> {
    Color::parse(value).ok_or_else(|| AppError::Other(format!("Invalid color '{}'", value)))
}

/// Draws bursts as rows of stars across the terminal
struct TerminalConfetti;

impl ParticleSink for TerminalConfetti {
    fn emit(&mut self, burst: ConfettiBurst) {
        const COLUMNS: f32 = 72.0;
        let indent = (burst.origin_x * COLUMNS) as usize;
        let stars = (burst.particle_count / 5).max(1) as usize;
        println!("{}{}", " ".repeat(indent), "*".repeat(stars));
    }
}
