// SPDX-License-Identifier: GPL-3.0-only

//! Caption text, bounded at the input boundary

use crate::constants::strip::MAX_CAPTION_CHARS;
use crate::errors::CaptionError;

/// Caption shown in the strip footer, at most 100 characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption(String);

impl Caption {
    /// Accept `text` verbatim, rejecting anything over the limit
    pub fn new(text: impl Into<String>) -> Result<Self, CaptionError> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_CAPTION_CHARS {
            return Err(CaptionError::TooLong {
                len,
                max: MAX_CAPTION_CHARS,
            });
        }
        Ok(Self(text))
    }

    /// Keep the first 100 characters of `text`, like a length-limited input
    pub fn truncated(text: &str) -> Self {
        Self(text.chars().take(MAX_CAPTION_CHARS).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Caption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "é".repeat(100);
        assert_eq!(Caption::new(text.clone()).unwrap().as_str(), text);
        assert!(Caption::new("é".repeat(101)).is_err());
    }

    #[test]
    fn test_truncated_clips() {
        let caption = Caption::truncated(&"ab".repeat(60));
        assert_eq!(caption.as_str().chars().count(), 100);
        assert!(caption.as_str().starts_with("abab"));
    }

    #[test]
    fn test_empty_is_default() {
        assert!(Caption::default().is_empty());
        assert_eq!(Caption::new("").unwrap(), Caption::default());
    }
}
