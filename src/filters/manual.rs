// SPDX-License-Identifier: GPL-3.0-only

//! Manual per-pixel filter backend
//!
//! For surfaces that ignore declarative filters: every function of the chain
//! is its own explicit loop over a floating point copy of the frame. The
//! copy is written back to 8 bits before a blur and once at the end, the
//! same points where the declarative path rounds.

use super::FilterBackend;
use super::blur::gaussian_blur;
use super::expression::{FilterChain, FilterOp};
use image::RgbaImage;

/// Backend that transforms pixels directly
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualBackend;

impl FilterBackend for ManualBackend {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn apply(&self, image: &mut RgbaImage, chain: &FilterChain) {
        if chain.is_identity() {
            return;
        }
        let mut rgb = load(image);
        for op in chain.ops() {
            match *op {
                FilterOp::Blur(sigma) => {
                    store(image, &rgb);
                    gaussian_blur(image, sigma);
                    rgb = load(image);
                }
                FilterOp::Grayscale(amount) => grayscale_pass(&mut rgb, amount),
                point => {
                    for pixel in rgb.iter_mut() {
                        point.apply_rgb(pixel);
                    }
                }
            }
        }
        store(image, &rgb);
    }
}

/// Move R, G and B toward their arithmetic mean; full strength sets all three to it
fn grayscale_pass(rgb: &mut [[f32; 3]], amount: f32) {
    for pixel in rgb.iter_mut() {
        let [r, g, b] = *pixel;
        let mean = (r + g + b) / 3.0;
        *pixel = [
            r + (mean - r) * amount,
            g + (mean - g) * amount,
            b + (mean - b) * amount,
        ]
        .map(|v| v.clamp(0.0, 1.0));
    }
}

fn load(image: &RgbaImage) -> Vec<[f32; 3]> {
    image
        .pixels()
        .map(|p| [p[0], p[1], p[2]].map(|c| f32::from(c) / 255.0))
        .collect()
}

/// Round back to 8 bits; alpha is left untouched
fn store(image: &mut RgbaImage, rgb: &[[f32; 3]]) {
    for (pixel, values) in image.pixels_mut().zip(rgb) {
        for (channel, value) in pixel.0.iter_mut().zip(values) {
            *channel = (value * 255.0).round() as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gray(pixel: [u8; 4]) -> [u8; 4] {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba(pixel));
        ManualBackend.apply(&mut image, &FilterChain::parse("grayscale(100%)"));
        image.get_pixel(0, 0).0
    }

    #[test]
    fn test_grayscale_mean_rounds() {
        // (10 + 20 + 31) / 3 = 20.33
        assert_eq!(gray([10, 20, 31, 77]), [20, 20, 20, 77]);
        // 62 / 3 = 20.67
        assert_eq!(gray([10, 20, 32, 77]), [21, 21, 21, 77]);
    }

    #[test]
    fn test_grayscale_mean_of_white() {
        assert_eq!(gray([255, 255, 255, 255]), [255, 255, 255, 255]);
    }

    #[test]
    fn test_ops_run_in_order() {
        let mut image = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 255]));
        ManualBackend.apply(&mut image, &FilterChain::parse("brightness(0.5) contrast(0)"));
        // Contrast 0 flattens to mid-gray whatever brightness did first
        assert_eq!(image.get_pixel(0, 0).0, [128, 128, 128, 255]);
    }
}
