use serde::{Deserialize, Serialize};

use super::model::SessionRecord;

/// Change notifications published by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Initial (or repeated) load finished.
    Loaded {
        #[serde(default)]
        record: Option<SessionRecord>,
    },
    /// A record was durably written and is now current.
    Saved { record: SessionRecord },
    /// The session was removed.
    Cleared,
}
