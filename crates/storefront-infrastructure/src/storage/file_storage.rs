//! File-backed key-value storage.
//!
//! Each key maps to `<dir>/<key>.json`. Blocking file I/O runs on the
//! blocking thread pool so the async callers never stall the runtime.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use storefront_core::error::{Result, StorefrontError};
use storefront_core::storage::KeyValueStorage;

use super::atomic_file::AtomicFile;

/// Durable key-value storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStorage {
    dir: PathBuf,
}

impl FileKeyValueStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file for a key, rejecting keys that could escape `dir`.
    fn file_for(&self, key: &str) -> std::result::Result<AtomicFile, String> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(format!("invalid storage key: {:?}", key));
        }

        Ok(AtomicFile::new(self.dir.join(format!("{}.json", key))))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorefrontError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key).map_err(StorefrontError::storage_read)?;
        run_blocking(move || file.read().map_err(StorefrontError::from))
            .await
            .map_err(StorefrontError::into_read_error)
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key).map_err(StorefrontError::storage_write)?;
        let value = value.to_string();
        run_blocking(move || file.write(&value).map_err(StorefrontError::from))
            .await
            .map_err(StorefrontError::into_write_error)
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let file = self.file_for(key).map_err(StorefrontError::storage_write)?;
        run_blocking(move || file.remove().map_err(StorefrontError::from))
            .await
            .map_err(StorefrontError::into_write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path());

        assert!(storage.get_item("userSession").await.unwrap().is_none());

        storage.set_item("userSession", "{}").await.unwrap();
        assert_eq!(
            storage.get_item("userSession").await.unwrap().as_deref(),
            Some("{}")
        );
        assert!(temp_dir.path().join("userSession.json").exists());

        storage.remove_item("userSession").await.unwrap();
        storage.remove_item("userSession").await.unwrap();
        assert!(storage.get_item("userSession").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileKeyValueStorage::new(temp_dir.path());

        let err = storage.set_item("../escape", "x").await.unwrap_err();
        assert!(err.is_storage_write());

        let err = storage.get_item("a/b").await.unwrap_err();
        assert!(err.is_storage_read());

        assert!(storage.remove_item("").await.unwrap_err().is_storage_write());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unwritable_dir_is_write_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o500)).unwrap();

        // Root ignores directory permissions; nothing to assert there
        if std::fs::write(locked.join("write_check"), "x").is_ok() {
            return;
        }

        let storage = FileKeyValueStorage::new(&locked);
        let err = storage.set_item("userSession", "{}").await.unwrap_err();
        assert!(err.is_storage_write());
    }
}
