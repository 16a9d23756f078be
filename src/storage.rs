use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object upload failed: {0}")]
    Upload(String),
    #[error("object delete failed: {0}")]
    Delete(String),
}

/// Gateway to the object store holding uploaded media.
///
/// Rows persist the relative object `key`; public URLs are resolved on the
/// read path with [`ObjectStorage::url_for`]. Uploads cannot participate in
/// the database transaction, so callers upload as late as possible and
/// delete best-effort when a later step fails.
pub trait ObjectStorage {
    /// Store `bytes` under `key` and return the stored key.
    fn upload(&self, bytes: &[u8], key: &str) -> Result<String, StorageError>;
    /// Remove the object at `key`.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
    /// Public URL for a stored key.
    fn url_for(&self, key: &str) -> String;
}

#[derive(Debug, Clone)]
/// Filesystem-backed store rooted at `root`, served under `base_url`.
pub struct LocalObjectStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStorage for LocalObjectStorage {
    fn upload(&self, bytes: &[u8], key: &str) -> Result<String, StorageError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::Upload(err.to_string()))?;
        }
        fs::write(&path, bytes).map_err(|err| StorageError::Upload(err.to_string()))?;
        Ok(key.to_string())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        fs::remove_file(self.path_for(key)).map_err(|err| StorageError::Delete(err.to_string()))
    }

    fn url_for(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}
