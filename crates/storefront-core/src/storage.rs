//! Durable key-value storage abstraction.

use async_trait::async_trait;

use crate::error::Result;

/// A platform key-value store whose operations may fail asynchronously.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a key that does not exist is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}
