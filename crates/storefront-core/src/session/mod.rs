//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: The persisted `SessionRecord`
//! - `predicate`: `is_logged_in` / `is_guest_session`
//! - `state`: Store lifecycle (`SessionState`, `LoadState`, `Identity`)
//! - `access`: Per-feature gating
//! - `event`: Change notifications
//! - `repository`: Persistence trait

mod access;
mod event;
mod model;
mod predicate;
mod repository;
mod state;

pub use access::{Access, Feature, Gate};
pub use event::SessionEvent;
pub use model::{GUEST_USER_ID, GUEST_USER_TYPE, RegistrationStatus, SessionRecord};
pub use predicate::{is_guest_session, is_logged_in};
pub use repository::SessionRepository;
pub use state::{Identity, LoadState, SessionState};
