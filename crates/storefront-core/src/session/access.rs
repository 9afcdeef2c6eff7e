//! Feature gating on top of the session predicates.
//!
//! Each gated screen picks exactly one predicate. The contact-revealing
//! screens use the guest classification; account screens use the narrower
//! logged-in check.

use serde::{Deserialize, Serialize};

use super::predicate::{is_guest_session, is_logged_in};
use super::state::{LoadState, SessionState};

/// Screens whose content depends on who the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Vendor details with phone and address.
    VendorContact,
    /// Hire-a-professional listing contact info.
    ProfessionalContact,
    /// Submitting an enquiry to a vendor.
    EnquirySubmission,
    /// The profile screen.
    Profile,
    /// The logout action.
    Logout,
}

/// Which predicate a feature is gated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Denied to anything the guest classification matches.
    NotGuest,
    /// Denied only when there is no session id at all.
    LoggedIn,
}

/// Outcome of checking a feature against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// The store has not loaded; render nothing yet.
    Pending,
    Granted,
    /// Show the "please sign in" interstitial.
    SignInRequired,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::VendorContact,
        Feature::ProfessionalContact,
        Feature::EnquirySubmission,
        Feature::Profile,
        Feature::Logout,
    ];

    pub fn gate(self) -> Gate {
        match self {
            Feature::VendorContact | Feature::ProfessionalContact | Feature::EnquirySubmission => {
                Gate::NotGuest
            }
            Feature::Profile | Feature::Logout => Gate::LoggedIn,
        }
    }

    pub fn access(self, state: &SessionState) -> Access {
        let allowed = state.record().map(|record| match self.gate() {
            Gate::NotGuest => !is_guest_session(record),
            Gate::LoggedIn => is_logged_in(record),
        });

        match allowed {
            LoadState::NotLoaded => Access::Pending,
            LoadState::Loaded(true) => Access::Granted,
            LoadState::Loaded(false) => Access::SignInRequired,
        }
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vendor_contact" => Ok(Feature::VendorContact),
            "professional_contact" => Ok(Feature::ProfessionalContact),
            "enquiry_submission" => Ok(Feature::EnquirySubmission),
            "profile" => Ok(Feature::Profile),
            "logout" => Ok(Feature::Logout),
            other => Err(format!("unknown feature: {}", other)),
        }
    }
}
