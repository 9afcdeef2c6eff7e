//! Session DTOs and migrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use version_migrate::{IntoDomain, MigratesTo, Migrator, Versioned};

use storefront_core::error::{Result, StorefrontError};
use storefront_core::session::{RegistrationStatus, SessionRecord};

/// Entity name the session migration path is registered under.
pub const SESSION_ENTITY: &str = "session";

/// Name of the version field in the persisted JSON object.
pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// A string field the legacy app sometimes wrote as a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LooseString {
    Text(String),
    Number(serde_json::Number),
}

impl LooseString {
    fn into_string(self) -> String {
        match self {
            LooseString::Text(text) => text,
            LooseString::Number(number) => number.to_string(),
        }
    }
}

/// Registration status as the PHP backend returned it: `1`, `"1"` or `true`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LooseStatus {
    Flag(bool),
    Number(u64),
    Text(String),
}

/// A legacy registration status that decoded to `0` or `1`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "LooseStatus")]
struct LegacyStatus(RegistrationStatus);

impl TryFrom<LooseStatus> for LegacyStatus {
    type Error = String;

    fn try_from(loose: LooseStatus) -> std::result::Result<Self, Self::Error> {
        let raw = match loose {
            LooseStatus::Flag(true) => return Ok(Self(RegistrationStatus::Complete)),
            LooseStatus::Flag(false) => return Ok(Self(RegistrationStatus::Pending)),
            LooseStatus::Number(number) => number,
            LooseStatus::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("registration status {:?} is not numeric", text))?,
        };

        u8::try_from(raw)
            .map_err(|_| format!("registration status {} out of range", raw))
            .and_then(RegistrationStatus::try_from)
            .map(Self)
    }
}

/// Session schema V0.0.0 (legacy, unversioned).
///
/// Read-only: nothing writes this shape any more. Stored values without a
/// `schemaVersion` field are tagged with this version before loading.
#[derive(Debug, Clone, Deserialize, Versioned)]
#[versioned(version = "0.0.0", version_key = "schemaVersion")]
#[serde(rename_all = "camelCase")]
pub struct SessionRecordV0 {
    id: LooseString,
    #[serde(default)]
    mobile: Option<LooseString>,
    #[serde(rename = "type", default)]
    user_type: Option<LooseString>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    secondary_mobile: Option<LooseString>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    registration_status: Option<LegacyStatus>,
    #[serde(default)]
    is_guest: Option<bool>,
}

/// Session schema V1.0.0 (current).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0", version_key = "schemaVersion")]
#[serde(rename_all = "camelCase")]
pub struct SessionRecordV1 {
    /// When the record was written. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub record: SessionRecord,
}

/// Type alias for the latest session version.
pub type SessionRecordDTO = SessionRecordV1;

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from SessionRecordV0 to SessionRecordV1.
impl MigratesTo<SessionRecordV1> for SessionRecordV0 {
    fn migrate(self) -> SessionRecordV1 {
        SessionRecordV1 {
            saved_at: None,
            record: SessionRecord {
                id: self.id.into_string(),
                mobile: self.mobile.map(LooseString::into_string),
                user_type: self.user_type.map(LooseString::into_string),
                name: self.name,
                email: self.email,
                secondary_mobile: self.secondary_mobile.map(LooseString::into_string),
                city: self.city,
                location: self.location,
                registration_status: self.registration_status.map(|status| status.0),
                is_guest: self.is_guest,
            },
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<SessionRecord> for SessionRecordV1 {
    fn into_domain(self) -> SessionRecord {
        self.record
    }
}

impl SessionRecordV1 {
    pub fn from_domain(record: &SessionRecord, saved_at: DateTime<Utc>) -> Self {
        Self {
            saved_at: Some(saved_at),
            record: record.clone(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the persisted session.
///
/// # Migration Path
///
/// - V0.0.0 → V1.0.0: Normalizes loosely typed legacy fields
/// - V1.0.0 → SessionRecord: Unwraps the record
pub fn create_session_migrator() -> Migrator {
    let mut migrator = Migrator::builder().build();

    let session_path = Migrator::define(SESSION_ENTITY)
        .from::<SessionRecordV0>()
        .step::<SessionRecordV1>()
        .into::<SessionRecord>();

    migrator
        .register(session_path)
        .expect("Failed to register session migration path");

    migrator
}

// ============================================================================
// Codec
// ============================================================================

/// Tags unversioned values as V0.0.0 and rejects versions this build does
/// not know.
fn tag_schema_version(value: &mut JsonValue) -> Result<()> {
    let obj = value.as_object_mut().ok_or_else(|| {
        StorefrontError::storage_read("persisted session is not a JSON object")
    })?;

    let version = match obj.get(SCHEMA_VERSION_FIELD) {
        None | Some(JsonValue::Null) => SessionRecordV0::VERSION.to_string(),
        Some(JsonValue::String(version)) => version.clone(),
        Some(other) => {
            return Err(StorefrontError::storage_read(format!(
                "invalid {}: {}",
                SCHEMA_VERSION_FIELD, other
            )));
        }
    };

    if version != SessionRecordV0::VERSION && version != SessionRecordDTO::VERSION {
        return Err(StorefrontError::storage_read(format!(
            "unsupported session schema version {} (newest known is {})",
            version,
            SessionRecordDTO::VERSION
        )));
    }

    obj.insert(SCHEMA_VERSION_FIELD.to_string(), JsonValue::String(version));
    Ok(())
}

/// Decodes a persisted session, migrating older schema versions.
///
/// A missing version field means V0.0.0. A record whose `id` is blank is
/// rejected the same way `save` rejects it.
pub fn decode_session(migrator: &Migrator, raw: &str) -> Result<SessionRecord> {
    let load = || -> Result<SessionRecord> {
        let mut value: JsonValue = serde_json::from_str(raw)?;
        tag_schema_version(&mut value)?;

        let record: SessionRecord = migrator.load_flat_from(SESSION_ENTITY, value)?;
        record.validate().map_err(StorefrontError::storage_read)?;
        Ok(record)
    };

    load().map_err(StorefrontError::into_read_error)
}

/// Encodes a session at the current schema version.
pub fn encode_session(
    migrator: &Migrator,
    record: &SessionRecord,
    saved_at: DateTime<Utc>,
) -> Result<String> {
    Ok(migrator.save_flat(SessionRecordDTO::from_domain(record, saved_at))?)
}
