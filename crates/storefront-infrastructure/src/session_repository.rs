//! Session repository backed by a key-value store.
//!
//! The record is stored as versioned JSON under a single fixed key.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use version_migrate::Migrator;

use storefront_core::config::DEFAULT_SESSION_KEY;
use storefront_core::error::{Result, StorefrontError};
use storefront_core::session::{SessionRecord, SessionRepository};
use storefront_core::storage::KeyValueStorage;

use crate::dto::{create_session_migrator, decode_session, encode_session};

/// `SessionRepository` over any `KeyValueStorage`.
#[derive(Clone)]
pub struct KeyValueSessionRepository {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    migrator: Arc<Migrator>,
}

impl KeyValueSessionRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            migrator: Arc::new(create_session_migrator()),
        }
    }

    /// Uses the standard `"userSession"` key.
    pub fn with_default_key(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::new(storage, DEFAULT_SESSION_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl SessionRepository for KeyValueSessionRepository {
    async fn load(&self) -> Result<Option<SessionRecord>> {
        let raw = self
            .storage
            .get_item(&self.key)
            .await
            .map_err(StorefrontError::into_read_error)?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        // The legacy app stored a literal "null" after logout
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        decode_session(&self.migrator, trimmed).map(Some)
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        record.validate().map_err(StorefrontError::invalid_record)?;

        let raw = encode_session(&self.migrator, record, Utc::now()).map_err(|e| match e {
            StorefrontError::Serialization { message, .. } => {
                StorefrontError::invalid_record(message)
            }
            other => other,
        })?;

        self.storage
            .set_item(&self.key, &raw)
            .await
            .map_err(StorefrontError::into_write_error)
    }

    async fn clear(&self) -> Result<()> {
        self.storage
            .remove_item(&self.key)
            .await
            .map_err(StorefrontError::into_write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStorage;

    fn repository(storage: &MemoryKeyValueStorage) -> KeyValueSessionRepository {
        KeyValueSessionRepository::with_default_key(Arc::new(storage.clone()))
    }

    #[tokio::test]
    async fn test_load_empty() {
        let storage = MemoryKeyValueStorage::new();
        assert!(repository(&storage).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = MemoryKeyValueStorage::new();
        let repo = repository(&storage);
        let record = SessionRecord::new("42", "9876543210").with_type("1");

        repo.save(&record).await.unwrap();

        let raw = storage.raw(DEFAULT_SESSION_KEY).await.unwrap();
        assert!(raw.contains("\"schemaVersion\":\"1.0.0\""));
        assert_eq!(repo.load().await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_save_rejects_blank_id_without_writing() {
        let storage = MemoryKeyValueStorage::new();
        let err = repository(&storage)
            .save(&SessionRecord::new(" ", "9876543210"))
            .await
            .unwrap_err();

        assert!(err.is_invalid_record());
        assert!(storage.raw(DEFAULT_SESSION_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_literal_null_is_no_session() {
        let storage = MemoryKeyValueStorage::with_entry(DEFAULT_SESSION_KEY, "null");
        assert!(repository(&storage).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_value_is_read_error() {
        let storage = MemoryKeyValueStorage::with_entry(DEFAULT_SESSION_KEY, "{\"id\":");
        let err = repository(&storage).load().await.unwrap_err();
        assert!(err.is_storage_read());
    }

    #[tokio::test]
    async fn test_legacy_value_is_migrated_on_load() {
        let storage = MemoryKeyValueStorage::with_entry(
            DEFAULT_SESSION_KEY,
            r#"{"id":17,"mobile":"9000000000","type":"1","registrationStatus":"1"}"#,
        );
        let record = repository(&storage).load().await.unwrap().unwrap();
        assert_eq!(record.id, "17");
        assert!(record.is_registration_complete());
    }

    #[tokio::test]
    async fn test_stored_blank_id_is_read_error() {
        let storage = MemoryKeyValueStorage::with_entry(
            DEFAULT_SESSION_KEY,
            r#"{"id":"","mobile":"9876543210"}"#,
        );
        let err = repository(&storage).load().await.unwrap_err();
        assert!(err.is_storage_read());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let storage = MemoryKeyValueStorage::new();
        let repo = repository(&storage);
        repo.save(&SessionRecord::guest()).await.unwrap();

        repo.clear().await.unwrap();
        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_custom_key() {
        let storage = MemoryKeyValueStorage::new();
        let repo = KeyValueSessionRepository::new(Arc::new(storage.clone()), "altSession");
        repo.save(&SessionRecord::guest()).await.unwrap();

        assert_eq!(repo.key(), "altSession");
        assert!(storage.raw("altSession").await.is_some());
        assert!(storage.raw(DEFAULT_SESSION_KEY).await.is_none());
    }
}
