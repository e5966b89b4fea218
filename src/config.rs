// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON under the platform config directory. A missing or
//! unreadable file yields the defaults so the booth always starts.

use crate::constants::{TimerPreset, capture};
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name used under the config, picture and cache directories
const APP_DIR: &str = "photobooth";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Countdown length in seconds before each grab
    pub timer_seconds: u32,
    /// Photos per session
    pub photo_limit: usize,
    /// Selected filter name (see the filter catalog)
    pub filter: String,
    /// Mirror captured frames horizontally (selfie mode)
    pub mirrored: bool,
    /// Where exported strips are written
    pub output_dir: PathBuf,
    /// Directory holding the strip template images
    pub template_dir: PathBuf,
    /// Font used for caption and date; system fonts are tried when unset
    pub font_path: Option<PathBuf>,
    /// Directory of the capture → composition handoff slot
    pub handoff_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer_seconds: TimerPreset::default().seconds(),
            photo_limit: capture::DEFAULT_PHOTO_LIMIT,
            filter: "None".to_string(),
            mirrored: true, // Default to mirrored (selfie mode)
            output_dir: default_output_dir(),
            template_dir: default_data_dir().join("strips"),
            font_path: None,
            handoff_dir: default_cache_dir(),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    /// Load the config from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No config file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<Config>(&contents) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config file, using defaults");
                Self::default()
            }
        }
    }

    /// Write the config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("create {}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| AppError::Config(format!("write {}: {}", path.display(), e)))
    }

    /// Clamp values a hand-edited file may have pushed out of range
    fn sanitized(mut self) -> Self {
        self.photo_limit = self
            .photo_limit
            .clamp(capture::MIN_PHOTO_LIMIT, capture::MAX_PHOTO_LIMIT);
        self
    }
}

/// Default directory for exported strips (~/Pictures/photobooth)
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "timer_seconds": 10, "photo_limit": 42 }"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.timer_seconds, 10);
        assert_eq!(config.photo_limit, capture::MAX_PHOTO_LIMIT);
        assert!(config.mirrored);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            filter: "Noir".to_string(),
            photo_limit: 6,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }
}
