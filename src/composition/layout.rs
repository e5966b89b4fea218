// SPDX-License-Identifier: GPL-3.0-only

//! Strip layout tree
//!
//! ```text
//! ┌──────────── 350 ────────────┐
//! │ 28                          │
//! │   ┌─────── photo 1 ───────┐ │
//! │   └───────────────────────┘ │
//! │ 16                          │
//! │   ┌─────── photo n ───────┐ │
//! │   └───────────────────────┘ │
//! │ 16                          │
//! │   caption            (100)  │
//! │   date                      │
//! │ 28                          │
//! └─────────────────────────────┘
//! ```

use super::color::Color;
use crate::constants::strip::{
    FONT_SIZE, FOOTER_HEIGHT, GAP, MAX_PHOTO_HEIGHT, PADDING, PHOTO_CORNER_RADIUS, WIDTH,
};
use crate::pipelines::photo::EncodedPhoto;
use chrono::NaiveDate;
use image::RgbaImage;
use std::sync::Arc;
use tracing::warn;

/// Axis-aligned box in strip pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Vertical placement of text inside its box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Top,
    Bottom,
}

/// A node of the strip visual tree
#[derive(Debug, Clone)]
pub enum StripNode {
    /// Root container: background color with an optional cover image
    Column {
        rect: Rect,
        background: Color,
        template: Option<Arc<RgbaImage>>,
        children: Vec<StripNode>,
    },
    /// A photo scaled to `rect`
    Photo {
        rect: Rect,
        photo: EncodedPhoto,
        corner_radius: u32,
    },
    /// Fixed-height box holding caption and date
    Footer { rect: Rect, children: Vec<StripNode> },
    /// Centered, wrapped text
    Text {
        rect: Rect,
        text: String,
        color: Color,
        font_size: f32,
        anchor: TextAnchor,
    },
}

impl StripNode {
    pub fn rect(&self) -> Rect {
        match self {
            StripNode::Column { rect, .. }
            | StripNode::Photo { rect, .. }
            | StripNode::Footer { rect, .. }
            | StripNode::Text { rect, .. } => *rect,
        }
    }

    pub fn children(&self) -> &[StripNode] {
        match self {
            StripNode::Column { children, .. } | StripNode::Footer { children, .. } => children,
            StripNode::Photo { .. } | StripNode::Text { .. } => &[],
        }
    }

    /// Visit this node and its descendants depth-first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a StripNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Text strings in paint order
    pub fn texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        self.walk(&mut |node| {
            if let StripNode::Text { text, .. } = node {
                texts.push(text.as_str());
            }
        });
        texts
    }

    /// Number of photo nodes
    pub fn photo_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| {
            if matches!(node, StripNode::Photo { .. }) {
                count += 1;
            }
        });
        count
    }
}

/// Date stamp as shown on the strip, e.g. "March 16, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Height of a photo scaled to `width`, keeping its aspect ratio
pub fn scaled_height(photo_width: u32, photo_height: u32, width: u32) -> u32 {
    if photo_width == 0 {
        return 0;
    }
    let w = u64::from(photo_width);
    ((u64::from(width) * u64::from(photo_height) + w / 2) / w) as u32
}

/// Inputs of one layout pass
pub(crate) struct LayoutInput<'a> {
    pub photos: &'a [EncodedPhoto],
    pub background: Color,
    pub template: Option<Arc<RgbaImage>>,
    pub caption: &'a str,
    pub font_color: Color,
    pub date: Option<NaiveDate>,
    pub rounded: bool,
}

/// Stack photos and the footer in a fixed-width column
pub(crate) fn layout_strip(input: LayoutInput<'_>) -> StripNode {
    let inner_width = WIDTH - 2 * PADDING;
    let corner_radius = if input.rounded { PHOTO_CORNER_RADIUS } else { 0 };

    let mut children = Vec::with_capacity(input.photos.len() + 1);
    let mut y = PADDING;
    for photo in input.photos {
        let mut height = scaled_height(photo.width(), photo.height(), inner_width);
        if height > MAX_PHOTO_HEIGHT {
            warn!(
                width = photo.width(),
                height = photo.height(),
                "Photo too tall for the strip, squeezing"
            );
            height = MAX_PHOTO_HEIGHT;
        }
        children.push(StripNode::Photo {
            rect: Rect::new(PADDING, y, inner_width, height),
            photo: photo.clone(),
            corner_radius,
        });
        y += height + GAP;
    }

    let footer_rect = Rect::new(PADDING, y, inner_width, FOOTER_HEIGHT);
    let mut lines = Vec::new();
    if !input.caption.is_empty() {
        lines.push(input.caption.to_string());
    }
    if let Some(date) = input.date {
        lines.push(format_date(date));
    }
    // Spread like justify-between: a lone line sits at the top
    let last = lines.len().saturating_sub(1);
    let footer_children = lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| StripNode::Text {
            rect: footer_rect,
            text,
            color: input.font_color,
            font_size: FONT_SIZE,
            anchor: if i > 0 && i == last {
                TextAnchor::Bottom
            } else {
                TextAnchor::Top
            },
        })
        .collect();
    children.push(StripNode::Footer {
        rect: footer_rect,
        children: footer_children,
    });

    StripNode::Column {
        rect: Rect::new(0, 0, WIDTH, footer_rect.bottom() + PADDING),
        background: input.background,
        template: input.template,
        children,
    }
}
