//! Profile-completion step that follows OTP verification.

use serde::{Deserialize, Serialize};
use storefront_core::session::{RegistrationStatus, SessionRecord};

/// Profile fields collected by the "complete profile" form.
///
/// Fields left as `None` keep whatever the record already had.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub secondary_mobile: Option<String>,
    pub city: Option<String>,
    pub location: Option<String>,
}

impl RegistrationDetails {
    /// Copies the provided fields onto `record` and marks registration complete.
    pub fn apply(self, record: &mut SessionRecord) {
        if let Some(name) = self.name {
            record.name = Some(name);
        }
        if let Some(email) = self.email {
            record.email = Some(email);
        }
        if let Some(secondary_mobile) = self.secondary_mobile {
            record.secondary_mobile = Some(secondary_mobile);
        }
        if let Some(city) = self.city {
            record.city = Some(city);
        }
        if let Some(location) = self.location {
            record.location = Some(location);
        }
        record.registration_status = Some(RegistrationStatus::Complete);
    }
}
