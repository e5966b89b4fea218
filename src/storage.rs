// SPDX-License-Identifier: GPL-3.0-only

//! Handoff storage between the capture and composition stages
//!
//! The chosen photos travel under the fixed key
//! [`handoff::KEY`](crate::constants::handoff::KEY) as a JSON array of PNG
//! data URIs. The store itself is a plain string slot, injected wherever it is
//! needed.

use crate::constants::handoff;
use crate::errors::StorageError;
use crate::pipelines::photo::EncodedPhoto;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// A string key-value slot
pub trait HandoffStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn clear(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, lost when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HandoffStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.values().remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a session directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl HandoffStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "Handoff value written");
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write photos to the handoff slot, replacing what was there
pub fn save_photos(store: &dyn HandoffStore, photos: &[EncodedPhoto]) -> Result<(), StorageError> {
    let uris: Vec<String> = photos.iter().map(EncodedPhoto::to_data_uri).collect();
    let value = serde_json::to_string(&uris)?;
    store.set(handoff::KEY, &value)?;
    info!(count = photos.len(), "Photos handed off");
    Ok(())
}

/// Read the photos from the handoff slot
///
/// An empty slot yields an empty list.
pub fn load_photos(store: &dyn HandoffStore) -> Result<Vec<EncodedPhoto>, StorageError> {
    let Some(value) = store.get(handoff::KEY)? else {
        debug!("Handoff slot is empty");
        return Ok(Vec::new());
    };

    let uris: Vec<String> = serde_json::from_str(&value)?;
    uris.iter()
        .enumerate()
        .map(|(index, uri)| {
            EncodedPhoto::from_data_uri(uri)
                .map_err(|e| StorageError::Malformed(format!("photo {}: {}", index, e)))
        })
        .collect()
}

/// Empty the handoff slot
pub fn clear_photos(store: &dyn HandoffStore) -> Result<(), StorageError> {
    store.clear(handoff::KEY)
}
