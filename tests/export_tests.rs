// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for composition and export

use chrono::NaiveDate;
use image::{Rgba, RgbaImage};
use photobooth::backends::virtual_camera::VirtualCamera;
use photobooth::capture::CaptureController;
use photobooth::composition::{
    Caption, Color, CompositionRenderer, StripComposition, StripStyle, StripTemplate,
    TemplateLibrary,
};
use photobooth::constants::FALLBACK_FONT_PATHS;
use photobooth::constants::export::STRIP_ELEMENT_ID;
use photobooth::constants::strip::{FOOTER_HEIGHT, MAX_PHOTO_HEIGHT, PADDING};
use photobooth::errors::{CaptionError, ExportError, RenderError};
use photobooth::export::{DirectorySink, Document, ExportService, Rasterizer};
use photobooth::pipelines::photo::{EncodedPhoto, PhotoEncoder};
use photobooth::storage::{self, MemoryStore};
use std::path::Path;

fn march_16() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()
}

fn solid_photo(width: u32, height: u32, color: [u8; 4]) -> EncodedPhoto {
    PhotoEncoder::encode_png(&RgbaImage::from_pixel(width, height, Rgba(color))).unwrap()
}

fn system_font() -> Option<Rasterizer> {
    let bytes = FALLBACK_FONT_PATHS
        .iter()
        .find_map(|path| std::fs::read(path).ok())?;
    Some(Rasterizer::from_font_bytes(bytes).unwrap())
}

/// Pixels in the footer band that differ from a white background
fn inked_footer_pixels(strip: &RgbaImage) -> usize {
    let (width, height) = strip.dimensions();
    let top = height - PADDING - FOOTER_HEIGHT;
    (top..height - PADDING)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| strip.get_pixel(x, y).0 != [255, 255, 255, 255])
        .count()
}

fn render_dated_strip(rasterizer: Rasterizer) -> RgbaImage {
    let style = StripStyle {
        show_date: true,
        ..StripStyle::default()
    };
    let composition = StripComposition::new(vec![solid_photo(4, 3, [0, 0, 255, 255])], style);
    let mut document = Document::new();
    document.mount(
        STRIP_ELEMENT_ID,
        CompositionRenderer::new(TemplateLibrary::new("/nonexistent"))
            .render(&composition, march_16()),
    );
    let strip = ExportService::new(rasterizer)
        .export(&document, STRIP_ELEMENT_ID)
        .unwrap();
    image::load_from_memory(strip.png_bytes()).unwrap().to_rgba8()
}

fn files_in(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_caption_limit() {
    let hundred = "a".repeat(100);
    let caption = Caption::new(hundred.clone()).unwrap();
    assert_eq!(caption.as_str(), hundred);

    let long = "a".repeat(101);
    assert_eq!(
        Caption::new(long.clone()).unwrap_err(),
        CaptionError::TooLong { len: 101, max: 100 }
    );
    assert_eq!(Caption::truncated(&long).as_str(), hundred);
}

#[test]
fn test_caption_rendered_verbatim() {
    let text = "x".repeat(100);
    let style = StripStyle {
        caption: Caption::new(text.clone()).unwrap(),
        ..StripStyle::default()
    };
    let composition = StripComposition::new(vec![solid_photo(4, 3, [0, 0, 0, 255])], style);
    let renderer = CompositionRenderer::new(TemplateLibrary::new("/nonexistent"));

    assert_eq!(renderer.render(&composition, march_16()).texts(), vec![text.as_str()]);
}

#[tokio::test(start_paused = true)]
async fn test_capture_to_exported_strip() {
    let controller = CaptureController::new(Box::new(VirtualCamera::test_pattern(64, 48)));
    controller.set_mirrored(false);
    controller.start_camera().await;
    controller.auto_capture().await;

    let store = MemoryStore::new();
    controller.hand_off(&store).unwrap();
    let photos = storage::load_photos(&store).unwrap();
    assert_eq!(photos.len(), 4);
    let before = photos.clone();

    let style = StripStyle {
        background: Color::parse("#592E83").unwrap(),
        caption: Caption::new("Best day ever").unwrap(),
        show_date: true,
        ..StripStyle::default()
    };
    let composition = StripComposition::new(photos, style.clone());
    let renderer = CompositionRenderer::new(TemplateLibrary::new("/nonexistent"));
    let mut document = Document::new();
    document.mount(STRIP_ELEMENT_ID, renderer.render(&composition, march_16()));

    let dir = tempfile::tempdir().unwrap();
    let service = ExportService::new(Rasterizer::new(None));
    let path = service
        .export_to(&document, STRIP_ELEMENT_ID, &DirectorySink::new(dir.path()))
        .unwrap();

    assert_eq!(files_in(dir.path()), vec!["photo-strip.png"]);
    let strip = image::open(&path).unwrap().to_rgba8();
    // 28 + 4 * (221 + 16) + 100 + 28
    assert_eq!(strip.dimensions(), (350, 1104));
    assert_eq!(strip.get_pixel(1, 1).0, [0x59, 0x2E, 0x83, 255]);
    assert_eq!(strip.get_pixel(30, 100).0, [255, 255, 255, 255]);

    // Inputs are untouched and still mounted
    assert_eq!(composition.photos, before);
    assert_eq!(composition.style, style);
    assert!(document.is_mounted(STRIP_ELEMENT_ID));
}

#[test]
fn test_template_covers_background() {
    let assets = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(10, 10, Rgba([0, 200, 0, 255]))
        .save(assets.path().join("film-strip.png"))
        .unwrap();

    let style = StripStyle {
        background: Color::parse("#FF0000").unwrap(),
        template: StripTemplate::Film,
        ..StripStyle::default()
    };
    let composition = StripComposition::new(vec![solid_photo(8, 8, [0, 0, 255, 255])], style);
    let mut document = Document::new();
    document.mount(
        STRIP_ELEMENT_ID,
        CompositionRenderer::new(TemplateLibrary::new(assets.path()))
            .render(&composition, march_16()),
    );

    let strip = ExportService::new(Rasterizer::without_text())
        .export(&document, STRIP_ELEMENT_ID)
        .unwrap();
    let image = image::load_from_memory(strip.png_bytes()).unwrap().to_rgba8();
    assert_eq!(image.get_pixel(1, 1).0, [0, 200, 0, 255]);
    assert_eq!(image.get_pixel(175, 100).0, [0, 0, 255, 255]);
}

#[test]
fn test_detached_strip_exports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExportService::new(Rasterizer::without_text());

    let mut document = Document::new();
    let composition = StripComposition::new(Vec::new(), StripStyle::default());
    document.mount(
        STRIP_ELEMENT_ID,
        CompositionRenderer::new(TemplateLibrary::new("/nonexistent"))
            .render(&composition, march_16()),
    );
    document.unmount(STRIP_ELEMENT_ID);

    let err = service
        .export_to(&document, STRIP_ELEMENT_ID, &DirectorySink::new(dir.path()))
        .unwrap_err();
    assert_eq!(
        err,
        ExportError::Render(RenderError::Detached(STRIP_ELEMENT_ID.to_string()))
    );
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn test_date_stamp_is_drawn_in_footer() {
    let Some(rasterizer) = system_font() else {
        eprintln!("No system font installed, skipping");
        return;
    };

    assert!(inked_footer_pixels(&render_dated_strip(rasterizer)) > 0);
    assert_eq!(inked_footer_pixels(&render_dated_strip(Rasterizer::without_text())), 0);
}

#[test]
fn test_very_tall_photo_is_squeezed() {
    let composition = StripComposition::new(
        vec![solid_photo(1, 20_000, [0, 0, 255, 255])],
        StripStyle::default(),
    );
    let mut document = Document::new();
    document.mount(
        STRIP_ELEMENT_ID,
        CompositionRenderer::new(TemplateLibrary::new("/nonexistent"))
            .render(&composition, march_16()),
    );

    let strip = ExportService::new(Rasterizer::without_text())
        .export(&document, STRIP_ELEMENT_ID)
        .unwrap();
    assert_eq!(
        (strip.width(), strip.height()),
        (350, 2 * PADDING + MAX_PHOTO_HEIGHT + 16 + FOOTER_HEIGHT)
    );
}
