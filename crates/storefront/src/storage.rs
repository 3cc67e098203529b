//! File-backed durable store.
//!
//! Each key is kept as `<dir>/<KEY>.json`. The directory is created by the
//! first write; reads never touch the filesystem beyond opening the file.
//! Writes go to a temporary file that is renamed over the target, so a crash
//! never leaves a half-written cart.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use webshop_core::{DurableStore, StorageError, StorageKey};

/// Durable store keeping one JSON document per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. Nothing is created on disk yet.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store writes to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl DurableStore for FileStore {
    fn load(&self, key: StorageKey) -> Option<Value> {
        let path = self.path(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read stored value");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Stored value is not valid JSON");
                None
            }
        }
    }

    fn store(&self, key: StorageKey, value: Value) -> Result<(), StorageError> {
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");

        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&tmp, serde_json::to_vec_pretty(&value)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}
