// SPDX-License-Identifier: GPL-3.0-only

//! Local download targets for exported strips

use crate::errors::ExportError;
use std::path::PathBuf;
use tracing::info;

/// Receives exported files; nothing leaves the device
pub trait DownloadSink {
    /// Store `bytes` under `filename`, returning where they went
    fn deliver(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes into a directory, silently replacing an existing file
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ExportError::Save(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)
            .map_err(|e| ExportError::Save(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), size = bytes.len(), "Strip saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrites_silently() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("out"));

        let first = sink.deliver("photo-strip.png", b"one").unwrap();
        let second = sink.deliver("photo-strip.png", b"two").unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read(second).unwrap(), b"two");
    }
}
