// SPDX-License-Identifier: GPL-3.0-only

//! Pixel filter engine
//!
//! Every filter goes through one capability, [`FilterEngine::apply`]
//! (`frame, name -> frame`). Two interchangeable backends implement it:
//!
//! - [`DeclarativeBackend`]: evaluates the catalog's filter expression the
//!   way a drawing surface applies a filter string
//! - [`ManualBackend`]: explicit per-pixel loops for surfaces that do not
//!   honor filter expressions
//!
//! The backend is chosen once from [`SurfaceCapabilities`]. Both backends
//! round to 8 bits at the same points, so every catalog filter looks the
//! same on either; unknown filter names are the identity transform in both.

pub mod blur;
pub mod catalog;
pub mod declarative;
pub mod expression;
pub mod manual;

pub use catalog::{FilterCatalog, FilterType};
pub use declarative::DeclarativeBackend;
pub use expression::{FilterChain, FilterOp};
pub use manual::ManualBackend;

use image::RgbaImage;
use tracing::debug;

/// A strategy for applying a filter chain to a frame
pub trait FilterBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Apply `chain` to `image` in place; dimensions never change
    fn apply(&self, image: &mut RgbaImage, chain: &FilterChain);
}

/// What the target rendering surface supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    /// The surface applies filter expressions itself while drawing
    pub declarative_filters: bool,
}

impl Default for SurfaceCapabilities {
    fn default() -> Self {
        Self {
            declarative_filters: true,
        }
    }
}

/// Applies named filters with the backend suited to the target surface
pub struct FilterEngine {
    backend: Box<dyn FilterBackend>,
}

impl FilterEngine {
    /// Pick the backend for a surface
    pub fn for_surface(capabilities: SurfaceCapabilities) -> Self {
        if capabilities.declarative_filters {
            Self::with_backend(Box::new(DeclarativeBackend))
        } else {
            Self::with_backend(Box::new(ManualBackend))
        }
    }

    pub fn with_backend(backend: Box<dyn FilterBackend>) -> Self {
        debug!(backend = backend.name(), "Filter engine ready");
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Return a filtered copy of `frame`
    pub fn apply(&self, frame: &RgbaImage, name: &str) -> RgbaImage {
        let mut out = frame.clone();
        self.apply_in_place(&mut out, name);
        out
    }

    /// Filter `frame` in place
    pub fn apply_in_place(&self, frame: &mut RgbaImage, name: &str) {
        let chain = FilterCatalog::global().lookup(name);
        if chain.is_identity() {
            return;
        }
        debug!(
            filter = name,
            expression = %chain,
            backend = self.backend.name(),
            "Applying filter"
        );
        self.backend.apply(frame, &chain);
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::for_surface(SurfaceCapabilities::default())
    }
}

/// Apply a named filter with the default (declarative) backend
pub fn apply_filter(frame: &RgbaImage, name: &str) -> RgbaImage {
    FilterEngine::default().apply(frame, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_frame() -> RgbaImage {
        RgbaImage::from_fn(9, 7, |x, y| {
            Rgba([
                (x * 29 % 256) as u8,
                (y * 37 % 256) as u8,
                ((x * y * 13) % 256) as u8,
                200 + (x % 3) as u8,
            ])
        })
    }

    fn both_engines() -> [FilterEngine; 2] {
        [
            FilterEngine::for_surface(SurfaceCapabilities {
                declarative_filters: true,
            }),
            FilterEngine::for_surface(SurfaceCapabilities {
                declarative_filters: false,
            }),
        ]
    }

    #[test]
    fn test_unknown_filter_is_identity() {
        let frame = sample_frame();
        for engine in both_engines() {
            assert_eq!(engine.apply(&frame, "doesNotExist"), frame);
            assert_eq!(engine.apply(&frame, "None"), frame);
        }
    }

    #[test]
    fn test_grayscale_is_idempotent() {
        let frame = sample_frame();
        for engine in both_engines() {
            let once = engine.apply(&frame, "BNW");
            let twice = engine.apply(&once, "BNW");
            assert_eq!(once, twice, "{} backend", engine.backend_name());
        }
    }

    #[test]
    fn test_backends_agree_on_every_filter() {
        let frame = sample_frame();
        let [declarative, manual] = both_engines();
        assert_eq!(declarative.apply(&frame, "BNW"), manual.apply(&frame, "BNW"));

        for filter in FilterType::ALL {
            let a = declarative.apply(&frame, filter.name());
            let b = manual.apply(&frame, filter.name());
            let max_diff = a
                .as_raw()
                .iter()
                .zip(b.as_raw())
                .map(|(x, y)| x.abs_diff(*y))
                .max()
                .unwrap_or(0);
            assert!(max_diff <= 1, "{} differs by {}", filter, max_diff);
        }
    }

    #[test]
    fn test_grayscale_is_mean_and_keeps_alpha() {
        let frame = sample_frame();
        let gray = apply_filter(&frame, "BNW");
        for (before, after) in frame.pixels().zip(gray.pixels()) {
            let sum = u32::from(before[0]) + u32::from(before[1]) + u32::from(before[2]);
            let mean = (f64::from(sum) / 3.0).round() as u8;
            assert_eq!(after.0, [mean, mean, mean, before[3]]);
        }
    }

    #[test]
    fn test_every_filter_keeps_dimensions_and_alpha() {
        let frame = sample_frame();
        for engine in both_engines() {
            for filter in FilterType::ALL {
                let out = engine.apply(&frame, filter.name());
                assert_eq!(out.dimensions(), frame.dimensions());
                for (before, after) in frame.pixels().zip(out.pixels()) {
                    assert_eq!(before[3], after[3], "{} changed alpha", filter);
                }
            }
        }
    }

    #[test]
    fn test_noir_is_gray() {
        let out = apply_filter(&sample_frame(), "Noir");
        assert!(out.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }
}
