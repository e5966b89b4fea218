// SPDX-License-Identifier: GPL-3.0-only

//! Separable gaussian blur on RGBA8 frames

use image::RgbaImage;

/// Blur `image` in place with standard deviation `sigma` pixels
///
/// The kernel radius is `ceil(3 * sigma)`; edges clamp. Sigma below a
/// hundredth of a pixel is treated as no blur.
pub fn gaussian_blur(image: &mut RgbaImage, sigma: f32) {
    if !sigma.is_finite() || sigma < 0.01 {
        return;
    }
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let radius = (sigma * 3.0).ceil() as u32;
    let kernel = gaussian_kernel_q16(radius, sigma);

    let src = image.as_raw().clone();
    let mut tmp = vec![0u8; src.len()];
    horizontal_pass(&src, &mut tmp, width, height, &kernel);

    vertical_pass(&tmp, &mut **image, width, height, &kernel);
}

/// Normalized kernel weights in Q16 fixed point, summing to exactly 1 << 16
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> Vec<u32> {
    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r).map(|i| (-f64::from(i * i) / denom).exp()).collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Put rounding drift on the center tap
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - acc).clamp(0, 65536) as u32;
    weights
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..3 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
            dst[out_idx + 3] = src[out_idx + 3];
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..3 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
            dst[out_idx + 3] = src[out_idx + 3];
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}
