// SPDX-License-Identifier: GPL-3.0-only

//! Photo strip composition
//!
//! Turns the handed-off photos plus the editor's style choices into a
//! [`StripNode`] tree. The tree is built fresh for every render; the date
//! stamp comes from the caller so rendering stays deterministic.

pub mod caption;
pub mod color;
pub mod layout;
pub mod template;

pub use caption::Caption;
pub use color::Color;
pub use layout::{Rect, StripNode, TextAnchor, format_date};
pub use template::{StripTemplate, TemplateLibrary};

use crate::constants::strip::{DEFAULT_BACKGROUND, DEFAULT_FONT_COLOR};
use crate::pipelines::photo::EncodedPhoto;
use chrono::NaiveDate;
use layout::LayoutInput;
use tracing::debug;

/// Editor choices for a strip
#[derive(Debug, Clone, PartialEq)]
pub struct StripStyle {
    pub background: Color,
    pub template: StripTemplate,
    pub caption: Caption,
    pub font_color: Color,
    pub show_date: bool,
    pub rounded: bool,
}

impl Default for StripStyle {
    fn default() -> Self {
        Self {
            background: Color::parse(DEFAULT_BACKGROUND).unwrap_or(Color::WHITE),
            template: StripTemplate::Default,
            caption: Caption::default(),
            font_color: Color::parse(DEFAULT_FONT_COLOR).unwrap_or(Color::BLACK),
            show_date: false,
            rounded: false,
        }
    }
}

/// Photos plus style: everything a strip is made of
#[derive(Debug, Clone)]
pub struct StripComposition {
    pub photos: Vec<EncodedPhoto>,
    pub style: StripStyle,
}

impl StripComposition {
    pub fn new(photos: Vec<EncodedPhoto>, style: StripStyle) -> Self {
        Self { photos, style }
    }
}

/// Builds strip trees, resolving template images from a library
#[derive(Debug, Clone)]
pub struct CompositionRenderer {
    templates: TemplateLibrary,
}

impl CompositionRenderer {
    pub fn new(templates: TemplateLibrary) -> Self {
        Self { templates }
    }

    /// Lay out `composition`; `today` is stamped when the date is enabled
    pub fn render(&self, composition: &StripComposition, today: NaiveDate) -> StripNode {
        let style = &composition.style;
        let root = layout::layout_strip(LayoutInput {
            photos: &composition.photos,
            background: style.background,
            template: self.templates.load(style.template),
            caption: style.caption.as_str(),
            font_color: style.font_color,
            date: style.show_date.then_some(today),
            rounded: style.rounded,
        });

        debug!(
            photos = composition.photos.len(),
            template = %style.template,
            background = %style.background,
            height = root.rect().height,
            "Strip composed"
        );
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StripStyle::default();
        assert_eq!(style.background, Color::WHITE);
        assert_eq!(style.font_color, Color::BLACK);
        assert!(!style.show_date && !style.rounded);
    }

    #[test]
    fn test_date_only_when_enabled() {
        let renderer = CompositionRenderer::new(TemplateLibrary::new("/nonexistent"));
        let today = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        let mut composition = StripComposition::new(Vec::new(), StripStyle::default());

        assert!(renderer.render(&composition, today).texts().is_empty());

        composition.style.show_date = true;
        composition.style.template = StripTemplate::Film;
        let root = renderer.render(&composition, today);
        assert_eq!(root.texts(), vec!["March 16, 2025"]);
        assert!(matches!(root, StripNode::Column { template: None, .. }));
    }
}
