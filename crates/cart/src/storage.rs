//! Durable key-value storage adapters for the serialized cart.
//!
//! [`JsonFileStorage`] is the localStorage analog: one file per key under a
//! root directory. [`MemoryStorage`] is ephemeral and shared between
//! clones, which makes it useful both as a session-only store and as a test
//! double that can be inspected after the cart store consumed it.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

use crate::ports::CartStorage;

/// Errors that can occur reading or writing the cart blob.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem read/write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// =============================================================================
// JsonFileStorage
// =============================================================================

/// File-backed storage: each key becomes one file under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage rooted at `root`. The directory is created lazily
    /// on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a storage key like `@RocketShoes:cart` to a safe file name.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl CartStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        fs::write(&path, blob)?;
        debug!(path = %path.display(), bytes = blob.len(), "cart blob written");
        Ok(())
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory storage. Clones share the same backing map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }
}
