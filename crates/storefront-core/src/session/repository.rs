//! Session repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::SessionRecord;

/// Durable home of the single session record.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Reads the persisted record, `None` if nothing is stored.
    async fn load(&self) -> Result<Option<SessionRecord>>;

    /// Replaces the persisted record.
    async fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Removes the persisted record. Removing an absent record succeeds.
    async fn clear(&self) -> Result<()>;
}
