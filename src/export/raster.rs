// SPDX-License-Identifier: GPL-3.0-only

//! Flattens a strip tree into one RGBA image

use crate::composition::{Color, Rect, StripNode, TextAnchor};
use crate::constants::FALLBACK_FONT_PATHS;
use crate::constants::strip::LINE_HEIGHT;
use crate::errors::RenderError;
use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, VerticalAlign,
    WrapStyle,
};
use fontdue::{Font, FontSettings};
use image::{RgbaImage, imageops};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Paints strip trees
pub struct Rasterizer {
    font: Option<Font>,
}

impl Rasterizer {
    /// Use the font at `font_path`, else the first system font found
    ///
    /// Without any usable font, text nodes are skipped.
    pub fn new(font_path: Option<&Path>) -> Self {
        let candidates = font_path
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FALLBACK_FONT_PATHS.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            match Font::from_bytes(bytes, FontSettings::default()) {
                Ok(font) => {
                    debug!(path = %path.display(), "Font loaded");
                    return Self { font: Some(font) };
                }
                Err(e) => warn!(path = %path.display(), error = e, "Failed to parse font"),
            }
        }

        warn!("No usable font found, caption and date will not be drawn");
        Self::without_text()
    }

    pub fn from_font_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| RenderError::Decode(format!("font: {}", e)))?;
        Ok(Self { font: Some(font) })
    }

    pub fn without_text() -> Self {
        Self { font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Rasterize `root` at its own size
    pub fn rasterize(&self, root: &StripNode) -> Result<RgbaImage, RenderError> {
        let rect = root.rect();
        if rect.is_empty() {
            return Err(RenderError::EmptyRegion {
                width: rect.width,
                height: rect.height,
            });
        }

        let mut canvas = RgbaImage::new(rect.x + rect.width, rect.y + rect.height);
        self.paint(&mut canvas, root)?;
        Ok(canvas)
    }

    fn paint(&self, canvas: &mut RgbaImage, node: &StripNode) -> Result<(), RenderError> {
        match node {
            StripNode::Column {
                rect,
                background,
                template,
                children,
            } => {
                fill(canvas, *rect, *background);
                if let Some(template) = template {
                    draw_cover(canvas, *rect, template);
                }
                for child in children {
                    self.paint(canvas, child)?;
                }
            }
            StripNode::Photo {
                rect,
                photo,
                corner_radius,
            } => {
                if rect.is_empty() {
                    return Ok(());
                }
                let decoded = photo
                    .decode()
                    .map_err(|e| RenderError::Decode(e.to_string()))?;
                let mut scaled = imageops::resize(
                    &decoded,
                    rect.width,
                    rect.height,
                    imageops::FilterType::Triangle,
                );
                round_corners(&mut scaled, *corner_radius);
                imageops::overlay(canvas, &scaled, i64::from(rect.x), i64::from(rect.y));
            }
            StripNode::Footer { children, .. } => {
                for child in children {
                    self.paint(canvas, child)?;
                }
            }
            StripNode::Text {
                rect,
                text,
                color,
                font_size,
                anchor,
            } => self.draw_text(canvas, *rect, text, *color, *font_size, *anchor),
        }
        Ok(())
    }

    fn draw_text(
        &self,
        canvas: &mut RgbaImage,
        rect: Rect,
        text: &str,
        color: Color,
        font_size: f32,
        anchor: TextAnchor,
    ) {
        let Some(font) = &self.font else {
            return;
        };

        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            x: rect.x as f32,
            y: rect.y as f32,
            max_width: Some(rect.width as f32),
            max_height: Some(rect.height as f32),
            horizontal_align: HorizontalAlign::Center,
            vertical_align: match anchor {
                TextAnchor::Top => VerticalAlign::Top,
                TextAnchor::Bottom => VerticalAlign::Bottom,
            },
            line_height: LINE_HEIGHT / font_size,
            wrap_style: WrapStyle::Word,
            wrap_hard_breaks: true,
        });
        layout.append(&[font], &TextStyle::new(text, font_size, 0));

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = font.rasterize_config(glyph.key);
            blend_glyph(
                canvas,
                glyph.x.round() as i64,
                glyph.y.round() as i64,
                metrics.width,
                &coverage,
                color,
            );
        }
    }
}

fn fill(canvas: &mut RgbaImage, rect: Rect, color: Color) {
    let pixel = color.to_rgba();
    let (width, height) = canvas.dimensions();
    for y in rect.y..rect.bottom().min(height) {
        for x in rect.x..(rect.x + rect.width).min(width) {
            canvas.put_pixel(x, y, pixel);
        }
    }
}

/// Scale `image` to cover `rect`, centered and cropped, and blend it in
fn draw_cover(canvas: &mut RgbaImage, rect: Rect, image: &RgbaImage) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || rect.is_empty() {
        return;
    }

    let scale = f64::max(
        f64::from(rect.width) / f64::from(width),
        f64::from(rect.height) / f64::from(height),
    );
    let scaled_width = ((f64::from(width) * scale).ceil() as u32).max(rect.width);
    let scaled_height = ((f64::from(height) * scale).ceil() as u32).max(rect.height);
    let scaled = imageops::resize(
        image,
        scaled_width,
        scaled_height,
        imageops::FilterType::Triangle,
    );

    let cropped = imageops::crop_imm(
        &scaled,
        (scaled_width - rect.width) / 2,
        (scaled_height - rect.height) / 2,
        rect.width,
        rect.height,
    )
    .to_image();
    imageops::overlay(canvas, &cropped, i64::from(rect.x), i64::from(rect.y));
}

/// Fade out the pixels outside a rounded-rectangle mask
fn round_corners(image: &mut RgbaImage, radius: u32) {
    let (width, height) = image.dimensions();
    let radius = radius.min(width / 2).min(height / 2);
    if radius == 0 {
        return;
    }

    let r = radius as f32;
    for y in 0..height {
        for x in 0..width {
            // Distance from the pixel center to the nearest corner circle center
            let cx = if x < radius {
                r
            } else if x >= width - radius {
                (width - radius) as f32
            } else {
                continue;
            };
            let cy = if y < radius {
                r
            } else if y >= height - radius {
                (height - radius) as f32
            } else {
                continue;
            };

            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let coverage = (r + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            let pixel = image.get_pixel_mut(x, y);
            pixel[3] = (f32::from(pixel[3]) * coverage).round() as u8;
        }
    }
}

fn blend_glyph(
    canvas: &mut RgbaImage,
    x: i64,
    y: i64,
    glyph_width: usize,
    coverage: &[u8],
    color: Color,
) {
    if glyph_width == 0 {
        return;
    }
    let (width, height) = canvas.dimensions();
    let src = [color.r, color.g, color.b];

    for (row, line) in coverage.chunks(glyph_width).enumerate() {
        let py = y + row as i64;
        if py < 0 || py >= i64::from(height) {
            continue;
        }
        for (col, &mask) in line.iter().enumerate() {
            let px = x + col as i64;
            if mask == 0 || px < 0 || px >= i64::from(width) {
                continue;
            }
            let pixel = canvas.get_pixel_mut(px as u32, py as u32);
            let alpha = u32::from(mask);
            for c in 0..3 {
                let blended =
                    (u32::from(src[c]) * alpha + u32::from(pixel[c]) * (255 - alpha) + 127) / 255;
                pixel[c] = blended as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::photo::PhotoEncoder;
    use image::Rgba;
    use std::sync::Arc;

    fn column(rect: Rect, children: Vec<StripNode>) -> StripNode {
        StripNode::Column {
            rect,
            background: Color::rgb(10, 20, 30),
            template: None,
            children,
        }
    }

    #[test]
    fn test_empty_region_is_an_error() {
        let root = column(Rect::new(0, 0, 350, 0), Vec::new());
        assert_eq!(
            Rasterizer::without_text().rasterize(&root).unwrap_err(),
            RenderError::EmptyRegion {
                width: 350,
                height: 0
            }
        );
    }

    #[test]
    fn test_background_and_photo() {
        let photo =
            PhotoEncoder::encode_png(&RgbaImage::from_pixel(2, 2, Rgba([200, 0, 0, 255]))).unwrap();
        let root = column(
            Rect::new(0, 0, 20, 20),
            vec![StripNode::Photo {
                rect: Rect::new(5, 5, 10, 10),
                photo,
                corner_radius: 0,
            }],
        );

        let image = Rasterizer::without_text().rasterize(&root).unwrap();
        assert_eq!(image.dimensions(), (20, 20));
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(10, 10).0, [200, 0, 0, 255]);
    }

    #[test]
    fn test_rounded_corners_show_background() {
        let photo =
            PhotoEncoder::encode_png(&RgbaImage::from_pixel(4, 4, Rgba([200, 0, 0, 255]))).unwrap();
        let root = column(
            Rect::new(0, 0, 40, 40),
            vec![StripNode::Photo {
                rect: Rect::new(0, 0, 40, 40),
                photo,
                corner_radius: 6,
            }],
        );

        let image = Rasterizer::without_text().rasterize(&root).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(20, 20).0, [200, 0, 0, 255]);
        assert_eq!(image.get_pixel(20, 0).0, [200, 0, 0, 255]);
    }

    #[test]
    fn test_unparseable_font_is_rejected() {
        let result = Rasterizer::from_font_bytes(b"not a font".to_vec());
        assert!(matches!(result, Err(RenderError::Decode(_))));
    }

    #[test]
    fn test_cover_template_fills_rect() {
        let template = Arc::new(RgbaImage::from_pixel(5, 50, Rgba([0, 255, 0, 255])));
        let root = StripNode::Column {
            rect: Rect::new(0, 0, 30, 10),
            background: Color::WHITE,
            template: Some(template),
            children: Vec::new(),
        };

        let image = Rasterizer::without_text().rasterize(&root).unwrap();
        assert!(image.pixels().all(|p| p.0 == [0, 255, 0, 255]));
    }
}
