// SPDX-License-Identifier: GPL-3.0-only

//! Hex colors for backgrounds and text

use image::Rgba;

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (the leading `#` is optional)
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut digits = hex.chars().map(|c| {
                    // #abc is shorthand for #aabbcc
                    let v = c.to_digit(16).unwrap_or(0) as u8;
                    v * 16 + v
                });
                Some(Self::rgb(digits.next()?, digits.next()?, digits.next()?))
            }
            6 => Some(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Color::parse("#000"), Some(Color::BLACK));
        assert_eq!(Color::parse("#FFFFFF"), Some(Color::WHITE));
        assert_eq!(Color::parse("#ff579f"), Some(Color::rgb(0xff, 0x57, 0x9f)));
        assert_eq!(Color::parse("592E83"), Some(Color::rgb(0x59, 0x2e, 0x83)));
        assert_eq!(Color::parse("#f0a"), Some(Color::rgb(0xff, 0x00, 0xaa)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "#", "#12", "#12345", "#GGGGGG", "red", "#ééé"] {
            assert_eq!(Color::parse(bad), None, "{bad}");
        }
    }

    #[test]
    fn test_swatches_parse() {
        for swatch in crate::constants::strip::BACKGROUND_SWATCHES {
            assert!(Color::parse(swatch).is_some(), "{swatch}");
        }
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Color::rgb(0x59, 0x2e, 0x83).to_string(), "#592E83");
    }
}
