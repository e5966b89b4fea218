// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Countdown presets offered by the capture controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerPreset {
    /// 3 second delay (default)
    #[default]
    Three,
    /// 5 second delay
    Five,
    /// 10 second delay
    Ten,
}

impl TimerPreset {
    /// All presets, shortest first
    pub const ALL: [TimerPreset; 3] = [TimerPreset::Three, TimerPreset::Five, TimerPreset::Ten];

    /// Countdown length in whole seconds
    pub fn seconds(&self) -> u32 {
        match self {
            TimerPreset::Three => 3,
            TimerPreset::Five => 5,
            TimerPreset::Ten => 10,
        }
    }

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            TimerPreset::Three => "3s delay",
            TimerPreset::Five => "5s delay",
            TimerPreset::Ten => "10s delay",
        }
    }

    /// The preset with this countdown length, if any
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.seconds() == seconds)
    }
}

/// Capture limits
pub mod capture {
    use super::Duration;

    /// Default number of photos per session
    pub const DEFAULT_PHOTO_LIMIT: usize = 4;

    /// Smallest allowed photo limit
    pub const MIN_PHOTO_LIMIT: usize = 1;

    /// Largest allowed photo limit
    pub const MAX_PHOTO_LIMIT: usize = 8;

    /// Photo limits offered by the capture controls
    pub const PHOTO_LIMIT_CHOICES: [usize; 5] = [1, 3, 4, 6, 8];

    /// Maximum number of photos that can be selected for a strip
    pub const MAX_SELECTION: usize = 4;

    /// Interval between countdown ticks
    pub const COUNTDOWN_TICK: Duration = Duration::from_millis(1000);

    /// Delay between the countdown reaching zero and the frame grab
    pub const SETTLE_BEFORE_GRAB: Duration = Duration::from_millis(300);

    /// Delay after a grab before the next auto-capture countdown starts
    pub const SETTLE_AFTER_GRAB: Duration = Duration::from_millis(800);

    /// How long the flash indicator stays on after a grab
    pub const FLASH_DURATION: Duration = Duration::from_millis(150);
}

/// Photo strip layout, in pixels
pub mod strip {
    /// Total strip width
    pub const WIDTH: u32 = 350;

    /// Padding around the strip content
    pub const PADDING: u32 = 28;

    /// Vertical gap between stacked elements
    pub const GAP: u32 = 16;

    /// Height of the caption/date footer
    pub const FOOTER_HEIGHT: u32 = 100;

    /// Tallest a single photo may be drawn; taller photos are squeezed
    pub const MAX_PHOTO_HEIGHT: u32 = 4 * (WIDTH - 2 * PADDING);

    /// Corner radius applied to photos when rounding is enabled
    pub const PHOTO_CORNER_RADIUS: u32 = 6;

    /// Caption and date font size
    pub const FONT_SIZE: f32 = 14.0;

    /// Line height for caption and date text
    pub const LINE_HEIGHT: f32 = 20.0;

    /// Maximum caption length in characters
    pub const MAX_CAPTION_CHARS: usize = 100;

    /// Default strip background color
    pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

    /// Default caption/date color
    pub const DEFAULT_FONT_COLOR: &str = "#000";

    /// Background color swatches offered by the editor
    pub const BACKGROUND_SWATCHES: [&str; 6] =
        ["#FFFFFF", "#000", "#FF0000", "#592E83", "#EF798A", "#ff579f"];
}

/// Export settings
pub mod export {
    use super::Duration;

    /// Default filename of the exported strip
    pub const DEFAULT_FILENAME: &str = "photo-strip.png";

    /// Element id the strip is mounted under
    pub const STRIP_ELEMENT_ID: &str = "photoStrip";

    /// Total confetti animation length
    pub const CONFETTI_DURATION: Duration = Duration::from_secs(15);

    /// Interval between confetti bursts
    pub const CONFETTI_INTERVAL: Duration = Duration::from_millis(250);

    /// Particle count of a burst at the start of the animation
    pub const CONFETTI_MAX_PARTICLES: f32 = 50.0;
}

/// Handoff storage
pub mod handoff {
    /// Fixed key of the capture → composition handoff slot
    pub const KEY: &str = "capturedPhotos";
}

/// Image data URI prefix for PNG photos
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// System font locations tried when no font is configured
pub const FALLBACK_FONT_PATHS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];
