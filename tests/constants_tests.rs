// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use photobooth::constants::{TimerPreset, capture, export, handoff, strip};

#[test]
fn test_timer_preset_values() {
    // Test that all presets exist (3s, 5s, 10s)
    assert_eq!(TimerPreset::ALL.len(), 3);
    assert_eq!(TimerPreset::default().seconds(), 3);
}

#[test]
fn test_timer_preset_ordering() {
    // Presets are ordered from shortest to longest delay
    let mut prev = 0;
    for preset in TimerPreset::ALL {
        assert!(preset.seconds() > prev, "Presets should be ordered");
        prev = preset.seconds();
    }
}

#[test]
fn test_timer_preset_from_seconds() {
    for preset in TimerPreset::ALL {
        assert_eq!(TimerPreset::from_seconds(preset.seconds()), Some(preset));
    }
    assert_eq!(TimerPreset::from_seconds(7), None);
}

#[test]
fn test_timer_preset_display_names() {
    for preset in TimerPreset::ALL {
        let name = preset.display_name();
        assert!(!name.is_empty(), "Preset {:?} has empty display name", preset);
    }
}

#[test]
fn test_limit_choices_within_bounds() {
    for limit in capture::PHOTO_LIMIT_CHOICES {
        assert!((capture::MIN_PHOTO_LIMIT..=capture::MAX_PHOTO_LIMIT).contains(&limit));
    }
    assert!(capture::PHOTO_LIMIT_CHOICES.contains(&capture::DEFAULT_PHOTO_LIMIT));
}

#[test]
fn test_strip_layout_fits() {
    assert!(2 * strip::PADDING < strip::WIDTH);
    assert_eq!(strip::MAX_CAPTION_CHARS, 100);
}

#[test]
fn test_handoff_and_export_names() {
    assert_eq!(handoff::KEY, "capturedPhotos");
    assert_eq!(export::DEFAULT_FILENAME, "photo-strip.png");
    assert_eq!(export::STRIP_ELEMENT_ID, "photoStrip");
}
