//! SessionRecord domain model.

use serde::{Deserialize, Serialize};

/// Identifier of the placeholder user created by "continue as guest".
pub const GUEST_USER_ID: &str = "guest_user";

/// Role tag carried by the guest placeholder user.
pub const GUEST_USER_TYPE: &str = "guest";

/// Whether the post-OTP profile step has been completed.
///
/// Persisted as the integer `0` or `1`; any other value fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RegistrationStatus {
    Pending,
    Complete,
}

impl TryFrom<u8> for RegistrationStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Complete),
            other => Err(format!("registration status must be 0 or 1, got {}", other)),
        }
    }
}

impl From<RegistrationStatus> for u8 {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Pending => 0,
            RegistrationStatus::Complete => 1,
        }
    }
}

/// The locally persisted description of the current user.
///
/// Only `id` is required. Profile fields fill in progressively as the
/// multi-step login flow proceeds, so everything else is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// User identifier, or [`GUEST_USER_ID`] for the guest placeholder.
    pub id: String,
    /// Phone number used as the login identifier. Empty for guests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Coarse role tag, e.g. `"1"` for an ordinary user or `"guest"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_status: Option<RegistrationStatus>,
    /// Set by the guest login flow. Informational only; guest
    /// classification never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_guest: Option<bool>,
}

impl SessionRecord {
    /// Creates a record for an OTP-verified user.
    pub fn new(id: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mobile: Some(mobile.into()),
            ..Self::default()
        }
    }

    /// The canonical record saved by "continue as guest".
    pub fn guest() -> Self {
        Self {
            id: GUEST_USER_ID.to_string(),
            mobile: Some(String::new()),
            user_type: Some(GUEST_USER_TYPE.to_string()),
            is_guest: Some(true),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_registration_status(mut self, status: RegistrationStatus) -> Self {
        self.registration_status = Some(status);
        self
    }

    /// True once the profile-completion step has been recorded.
    pub fn is_registration_complete(&self) -> bool {
        self.registration_status == Some(RegistrationStatus::Complete)
    }

    /// Checks the constraints `save` enforces before any I/O.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("session id must not be blank".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_record_fields() {
        let guest = SessionRecord::guest();
        assert_eq!(guest.id, GUEST_USER_ID);
        assert_eq!(guest.mobile.as_deref(), Some(""));
        assert_eq!(guest.user_type.as_deref(), Some(GUEST_USER_TYPE));
        assert_eq!(guest.is_guest, Some(true));
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        assert!(SessionRecord::new("", "9876543210").validate().is_err());
        assert!(SessionRecord::new("   ", "9876543210").validate().is_err());
        assert!(SessionRecord::new("42", "").validate().is_ok());
    }

    #[test]
    fn test_serializes_type_field_name() {
        let record = SessionRecord::new("42", "9876543210").with_type("1");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "1");
        assert_eq!(json["mobile"], "9876543210");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_registration_status_rejects_out_of_range() {
        let status: RegistrationStatus = serde_json::from_str("1").unwrap();
        assert_eq!(status, RegistrationStatus::Complete);
        assert!(serde_json::from_str::<RegistrationStatus>("2").is_err());
    }
}
