pub mod registration;
pub mod session_store;

pub use registration::RegistrationDetails;
pub use session_store::SessionStore;
