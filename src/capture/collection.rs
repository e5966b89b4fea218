// SPDX-License-Identifier: GPL-3.0-only

//! Bounded photo collection and the selection over it

use crate::constants::capture::{MAX_PHOTO_LIMIT, MAX_SELECTION, MIN_PHOTO_LIMIT};
use crate::pipelines::photo::EncodedPhoto;

/// Clamp a requested photo limit into the allowed range
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_PHOTO_LIMIT, MAX_PHOTO_LIMIT)
}

/// Captured photos in capture order, never longer than the limit
#[derive(Debug, Clone)]
pub struct PhotoCollection {
    photos: Vec<EncodedPhoto>,
    limit: usize,
}

impl PhotoCollection {
    pub fn new(limit: usize) -> Self {
        let limit = clamp_limit(limit);
        Self {
            photos: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit; existing photos are discarded
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = clamp_limit(limit);
        self.photos.clear();
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.photos.len() >= self.limit
    }

    /// Append a photo; returns `false` and drops it when full
    pub fn push(&mut self, photo: EncodedPhoto) -> bool {
        if self.is_full() {
            return false;
        }
        self.photos.push(photo);
        true
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }

    pub fn get(&self, index: usize) -> Option<&EncodedPhoto> {
        self.photos.get(index)
    }

    pub fn as_slice(&self) -> &[EncodedPhoto] {
        &self.photos
    }
}

/// Collection indices chosen for the strip, in the order they were chosen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: Vec<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `index` for a collection of `collection_len` photos
    ///
    /// Out-of-range indices and additions beyond [`MAX_SELECTION`] are
    /// ignored. Returns whether `index` is selected afterwards.
    pub fn toggle(&mut self, index: usize, collection_len: usize) -> bool {
        if index >= collection_len {
            return false;
        }
        if let Some(pos) = self.indices.iter().position(|&i| i == index) {
            self.indices.remove(pos);
            return false;
        }
        if self.indices.len() >= MAX_SELECTION {
            return false;
        }
        self.indices.push(index);
        true
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// The selected photos, in selection order
    pub fn resolve(&self, collection: &PhotoCollection) -> Vec<EncodedPhoto> {
        self.indices
            .iter()
            .filter_map(|&i| collection.get(i).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::photo::PhotoEncoder;
    use image::{Rgba, RgbaImage};

    fn photo(shade: u8) -> EncodedPhoto {
        PhotoEncoder::encode_png(&RgbaImage::from_pixel(2, 2, Rgba([shade, 0, 0, 255]))).unwrap()
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PhotoCollection::new(0).limit(), 1);
        assert_eq!(PhotoCollection::new(20).limit(), 8);
        assert_eq!(PhotoCollection::new(6).limit(), 6);
    }

    #[test]
    fn test_push_stops_at_limit() {
        let mut photos = PhotoCollection::new(3);
        for shade in 0..5 {
            photos.push(photo(shade));
        }
        assert_eq!(photos.len(), 3);
        assert!(photos.is_full());
        assert_eq!(photos.get(2), Some(&photo(2)));
    }

    #[test]
    fn test_set_limit_clears() {
        let mut photos = PhotoCollection::new(4);
        photos.push(photo(1));
        photos.set_limit(6);
        assert!(photos.is_empty());
        assert_eq!(photos.limit(), 6);
    }

    #[test]
    fn test_selection_toggle_and_cap() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(5, 8));
        assert!(selection.toggle(1, 8));
        assert!(!selection.toggle(5, 8));
        assert_eq!(selection.indices(), &[1]);

        for i in [2, 3, 4] {
            assert!(selection.toggle(i, 8));
        }
        assert!(!selection.toggle(6, 8));
        assert_eq!(selection.len(), MAX_SELECTION);
    }

    #[test]
    fn test_selection_ignores_out_of_range() {
        let mut selection = SelectionSet::new();
        assert!(!selection.toggle(3, 3));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_resolve_keeps_selection_order() {
        let mut photos = PhotoCollection::new(4);
        for shade in [10, 20, 30] {
            photos.push(photo(shade));
        }
        let mut selection = SelectionSet::new();
        selection.toggle(2, photos.len());
        selection.toggle(0, photos.len());

        assert_eq!(selection.resolve(&photos), vec![photo(30), photo(10)]);
    }
}
