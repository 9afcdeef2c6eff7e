//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of persisted data.
//! They are private to the infrastructure layer and handle the evolution
//! of the storage format over time.
//!
//! ### Session Version History
//! - **0.0.0**: Legacy format written by the first app release. No version
//!   field; `id` may be a number and `registrationStatus` may be a string.
//! - **1.0.0**: Adds `schemaVersion` and `savedAt`; fields are strictly typed.
//!
//! ### AppConfig Version History
//! - **1.0.0**: `[storage]` and `[logging]` sections.

mod app_config;
mod session;

pub use app_config::{AppConfigV1_0_0, create_app_config_migrator};
pub use session::{
    SCHEMA_VERSION_FIELD, SESSION_ENTITY, SessionRecordDTO, SessionRecordV0, SessionRecordV1,
    create_session_migrator, decode_session, encode_session,
};
