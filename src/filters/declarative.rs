// SPDX-License-Identifier: GPL-3.0-only

//! Declarative filter backend
//!
//! Evaluates a filter chain the way a compositing surface applies a filter
//! string while drawing: consecutive point functions are fused into a single
//! pass over the frame, in floating point, and rounded to 8 bits once at the
//! end of the pass. Blur splits the chain into separate passes.

use super::FilterBackend;
use super::blur::gaussian_blur;
use super::expression::{FilterChain, FilterOp};
use image::RgbaImage;

/// Backend for surfaces that honor declarative filter expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarativeBackend;

impl FilterBackend for DeclarativeBackend {
    fn name(&self) -> &'static str {
        "declarative"
    }

    fn apply(&self, image: &mut RgbaImage, chain: &FilterChain) {
        let mut pending: Vec<FilterOp> = Vec::new();
        for op in chain.ops() {
            match op {
                FilterOp::Blur(sigma) => {
                    fused_pass(image, &pending);
                    pending.clear();
                    gaussian_blur(image, *sigma);
                }
                point => pending.push(*point),
            }
        }
        fused_pass(image, &pending);
    }
}

/// Run all point ops on each pixel in one pass; alpha is left untouched
fn fused_pass(image: &mut RgbaImage, ops: &[FilterOp]) {
    if ops.is_empty() {
        return;
    }
    for pixel in image.pixels_mut() {
        let mut rgb = [
            f32::from(pixel[0]) / 255.0,
            f32::from(pixel[1]) / 255.0,
            f32::from(pixel[2]) / 255.0,
        ];
        for op in ops {
            op.apply_rgb(&mut rgb);
        }
        for (channel, value) in pixel.0.iter_mut().zip(rgb) {
            *channel = (value * 255.0).round() as u8;
        }
    }
}
