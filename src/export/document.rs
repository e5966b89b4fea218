// SPDX-License-Identifier: GPL-3.0-only

//! The visible tree export reads from

use crate::composition::StripNode;
use std::collections::HashMap;
use tracing::debug;

/// Mounted strip trees, addressed by element id
#[derive(Debug, Default)]
pub struct Document {
    elements: HashMap<String, StripNode>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `node` under `id`, returning whatever it replaced
    pub fn mount(&mut self, id: impl Into<String>, node: StripNode) -> Option<StripNode> {
        let id = id.into();
        debug!(id = %id, "Element mounted");
        self.elements.insert(id, node)
    }

    pub fn unmount(&mut self, id: &str) -> Option<StripNode> {
        debug!(id, "Element unmounted");
        self.elements.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&StripNode> {
        self.elements.get(id)
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{Color, Rect};

    fn empty_column() -> StripNode {
        StripNode::Column {
            rect: Rect::new(0, 0, 10, 10),
            background: Color::WHITE,
            template: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_mount_and_unmount() {
        let mut document = Document::new();
        assert!(document.mount("photoStrip", empty_column()).is_none());
        assert!(document.is_mounted("photoStrip"));
        assert!(document.mount("photoStrip", empty_column()).is_some());

        assert!(document.unmount("photoStrip").is_some());
        assert!(document.get("photoStrip").is_none());
    }
}
