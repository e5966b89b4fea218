// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use photobooth::Config;
use photobooth::constants::capture;

#[test]
fn test_config_default() {
    let config = Config::default();

    // Check sensible defaults
    assert!(config.mirrored, "Photos should be mirrored by default");
    assert_eq!(config.timer_seconds, 3);
    assert_eq!(config.photo_limit, capture::DEFAULT_PHOTO_LIMIT);
    assert_eq!(config.filter, "None");
    assert!(config.font_path.is_none());
}

#[test]
fn test_config_output_dir() {
    let config = Config::default();
    assert!(
        config.output_dir.ends_with("photobooth"),
        "Strips should land in a photobooth directory"
    );
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        Config::load_from(&dir.path().join("absent.json")),
        Config::default()
    );
}

#[test]
fn test_zero_limit_is_raised_to_minimum() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "photo_limit": 0 }"#).unwrap();

    assert_eq!(Config::load_from(&path).photo_limit, capture::MIN_PHOTO_LIMIT);
}
