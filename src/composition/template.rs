// SPDX-License-Identifier: GPL-3.0-only

//! Decorative strip templates drawn over the background color

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Strip template choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StripTemplate {
    /// Plain background color
    #[default]
    Default,
    Film,
    Hearts,
    Cute,
    Futuristic,
    Beach,
}

impl StripTemplate {
    pub const ALL: [StripTemplate; 6] = [
        StripTemplate::Default,
        StripTemplate::Film,
        StripTemplate::Hearts,
        StripTemplate::Cute,
        StripTemplate::Futuristic,
        StripTemplate::Beach,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StripTemplate::Default => "Default",
            StripTemplate::Film => "Film",
            StripTemplate::Hearts => "Hearts",
            StripTemplate::Cute => "Cute",
            StripTemplate::Futuristic => "Futuristic",
            StripTemplate::Beach => "Beach",
        }
    }

    /// Image file inside the template directory
    pub fn file_name(&self) -> Option<&'static str> {
        match self {
            StripTemplate::Default => None,
            StripTemplate::Film => Some("film-strip.png"),
            StripTemplate::Hearts => Some("heart-strip.png"),
            StripTemplate::Cute => Some("cute-pink-strip.png"),
            StripTemplate::Futuristic => Some("futuristic-strip.png"),
            StripTemplate::Beach => Some("beach-strip.png"),
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for StripTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Loads template images from an asset directory
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    dir: PathBuf,
}

impl TemplateLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the template image
    ///
    /// A missing or unreadable image leaves the plain background, the same
    /// as a background image URL that fails to load.
    pub fn load(&self, template: StripTemplate) -> Option<Arc<RgbaImage>> {
        let path = self.dir.join(template.file_name()?);
        match image::open(&path) {
            Ok(img) => {
                debug!(template = %template, path = %path.display(), "Template loaded");
                Some(Arc::new(img.to_rgba8()))
            }
            Err(e) => {
                warn!(template = %template, path = %path.display(), error = %e, "Template unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_from_name() {
        assert_eq!(StripTemplate::from_name("hearts"), Some(StripTemplate::Hearts));
        assert_eq!(StripTemplate::from_name("Default"), Some(StripTemplate::Default));
        assert_eq!(StripTemplate::from_name("polka"), None);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]))
            .save(dir.path().join("film-strip.png"))
            .unwrap();

        let library = TemplateLibrary::new(dir.path());
        assert!(library.load(StripTemplate::Default).is_none());
        assert!(library.load(StripTemplate::Beach).is_none());
        let film = library.load(StripTemplate::Film).unwrap();
        assert_eq!(film.dimensions(), (4, 4));
    }
}
