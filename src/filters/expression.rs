// SPDX-License-Identifier: GPL-3.0-only

//! Filter expressions
//!
//! A subset of the CSS `filter` property grammar, e.g.
//! `sepia(100%) contrast(1.25) brightness(0.9)`. Functions apply left to
//! right; `none` or an empty string is the identity chain.

use std::fmt;
use tracing::debug;

/// One filter function with its resolved amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    /// Move each channel toward the mean of R, G and B (0..=1)
    Grayscale(f32),
    /// Sepia tone matrix (0..=1)
    Sepia(f32),
    /// Saturation matrix, 1 = unchanged
    Saturate(f32),
    /// Scale around mid-gray, 1 = unchanged
    Contrast(f32),
    /// Linear multiplier, 1 = unchanged
    Brightness(f32),
    /// Gaussian blur standard deviation in pixels
    Blur(f32),
}

impl FilterOp {
    /// Apply a point op to normalized RGB in place, clamping the result
    ///
    /// Blur is a no-op here; it needs neighboring pixels.
    #[inline]
    pub fn apply_rgb(&self, rgb: &mut [f32; 3]) {
        let [r, g, b] = *rgb;
        let out = match *self {
            FilterOp::Grayscale(amount) => {
                let mean = (r + g + b) / 3.0;
                [
                    r + (mean - r) * amount,
                    g + (mean - g) * amount,
                    b + (mean - b) * amount,
                ]
            }
            FilterOp::Sepia(amount) => {
                let inv = 1.0 - amount;
                [
                    (0.393 + 0.607 * inv) * r + (0.769 - 0.769 * inv) * g + (0.189 - 0.189 * inv) * b,
                    (0.349 - 0.349 * inv) * r + (0.686 + 0.314 * inv) * g + (0.168 - 0.168 * inv) * b,
                    (0.272 - 0.272 * inv) * r + (0.534 - 0.534 * inv) * g + (0.131 + 0.869 * inv) * b,
                ]
            }
            FilterOp::Saturate(s) => [
                (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b,
                (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b,
                (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b,
            ],
            FilterOp::Contrast(c) => [
                (r - 0.5) * c + 0.5,
                (g - 0.5) * c + 0.5,
                (b - 0.5) * c + 0.5,
            ],
            FilterOp::Brightness(k) => [r * k, g * k, b * k],
            FilterOp::Blur(_) => return,
        };
        *rgb = out.map(|v| v.clamp(0.0, 1.0));
    }

    fn parse(name: &str, arg: &str) -> Option<Self> {
        let arg = arg.trim();
        match name {
            "grayscale" => Some(FilterOp::Grayscale(parse_amount(arg, 1.0)?.clamp(0.0, 1.0))),
            "sepia" => Some(FilterOp::Sepia(parse_amount(arg, 1.0)?.clamp(0.0, 1.0))),
            "saturate" => Some(FilterOp::Saturate(parse_amount(arg, 1.0)?.max(0.0))),
            "contrast" => Some(FilterOp::Contrast(parse_amount(arg, 1.0)?.max(0.0))),
            "brightness" => Some(FilterOp::Brightness(parse_amount(arg, 1.0)?.max(0.0))),
            "blur" => Some(FilterOp::Blur(parse_length(arg)?.max(0.0))),
            _ => None,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Grayscale(a) => write!(f, "grayscale({}%)", a * 100.0),
            FilterOp::Sepia(a) => write!(f, "sepia({}%)", a * 100.0),
            FilterOp::Saturate(s) => write!(f, "saturate({})", s),
            FilterOp::Contrast(c) => write!(f, "contrast({})", c),
            FilterOp::Brightness(k) => write!(f, "brightness({})", k),
            FilterOp::Blur(px) => write!(f, "blur({}px)", px),
        }
    }
}

/// An ordered list of filter functions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    ops: Vec<FilterOp>,
}

impl FilterChain {
    /// The identity chain
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn new(ops: Vec<FilterOp>) -> Self {
        Self { ops }
    }

    /// Parse a filter expression
    ///
    /// Parsing is lenient: unknown functions and malformed arguments are
    /// skipped, so the worst case is the identity chain.
    pub fn parse(expression: &str) -> Self {
        let expression = expression.trim();
        if expression.is_empty() || expression.eq_ignore_ascii_case("none") {
            return Self::identity();
        }

        let mut ops = Vec::new();
        let mut rest = expression;
        while let Some(open) = rest.find('(') {
            let Some(close) = rest[open..].find(')').map(|i| open + i) else {
                debug!(expression, "Unterminated filter function");
                break;
            };
            let name = rest[..open].trim().to_ascii_lowercase();
            let arg = &rest[open + 1..close];
            match FilterOp::parse(&name, arg) {
                Some(op) => ops.push(op),
                None => debug!(function = %name, arg, "Skipping unsupported filter function"),
            }
            rest = &rest[close + 1..];
        }

        Self { ops }
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "none");
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

/// `50%` → 0.5, `1.25` → 1.25, empty → `default`
fn parse_amount(arg: &str, default: f32) -> Option<f32> {
    if arg.is_empty() {
        return Some(default);
    }
    let value = match arg.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => arg.parse::<f32>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// `2px` → 2.0, `0` → 0.0, empty → 0
fn parse_length(arg: &str) -> Option<f32> {
    if arg.is_empty() {
        return Some(0.0);
    }
    let value = arg.strip_suffix("px").unwrap_or(arg).trim().parse::<f32>().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vintage() {
        let chain = FilterChain::parse("sepia(100%) contrast(1.25) brightness(0.9)");
        assert_eq!(
            chain.ops(),
            &[
                FilterOp::Sepia(1.0),
                FilterOp::Contrast(1.25),
                FilterOp::Brightness(0.9)
            ]
        );
    }

    #[test]
    fn test_none_and_garbage_are_identity() {
        assert!(FilterChain::parse("none").is_identity());
        assert!(FilterChain::parse("  ").is_identity());
        assert!(FilterChain::parse("wobble(3) sepia(abc").is_identity());
    }

    #[test]
    fn test_unknown_function_is_skipped() {
        let chain = FilterChain::parse("hue-rotate(90deg) blur(1px)");
        assert_eq!(chain.ops(), &[FilterOp::Blur(1.0)]);
    }

    #[test]
    fn test_display() {
        let chain = FilterChain::parse("grayscale(100%) brightness(0.75)");
        assert_eq!(chain.to_string(), "grayscale(100%) brightness(0.75)");
        assert_eq!(FilterChain::identity().to_string(), "none");
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        let mut rgb = [0.5, 0.25, 1.0];
        FilterOp::Contrast(2.0).apply_rgb(&mut rgb);
        assert_eq!(rgb, [0.5, 0.0, 1.0]);
    }
}
