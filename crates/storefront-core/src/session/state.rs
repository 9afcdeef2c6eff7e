//! Session lifecycle state.

use serde::{Deserialize, Serialize};

use super::model::SessionRecord;
use super::predicate::{is_guest_session, is_logged_in};

/// The three states of the session store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "record", rename_all = "snake_case")]
pub enum SessionState {
    /// Persisted storage has not been read yet.
    #[default]
    Uninitialized,
    /// Storage was read and held no session.
    LoadedEmpty,
    /// Storage held a session.
    LoadedPresent(SessionRecord),
}

impl SessionState {
    pub fn from_record(record: Option<SessionRecord>) -> Self {
        match record {
            Some(record) => Self::LoadedPresent(record),
            None => Self::LoadedEmpty,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// The current record, or `NotLoaded` before the first load.
    pub fn record(&self) -> LoadState<Option<&SessionRecord>> {
        match self {
            Self::Uninitialized => LoadState::NotLoaded,
            Self::LoadedEmpty => LoadState::Loaded(None),
            Self::LoadedPresent(record) => LoadState::Loaded(Some(record)),
        }
    }

    pub fn is_logged_in(&self) -> LoadState<bool> {
        self.record().map(is_logged_in)
    }

    pub fn is_guest(&self) -> LoadState<bool> {
        self.record().map(is_guest_session)
    }

    pub fn identity(&self) -> Identity {
        match self {
            Self::Uninitialized => Identity::Unknown,
            Self::LoadedEmpty => Identity::Anonymous,
            Self::LoadedPresent(record) if is_guest_session(Some(record)) => {
                Identity::Guest(record.clone())
            }
            Self::LoadedPresent(record) if is_logged_in(Some(record)) => {
                Identity::Authenticated(record.clone())
            }
            // Not a guest but without an id: nobody is signed in
            Self::LoadedPresent(_) => Identity::Anonymous,
        }
    }
}

/// A value that cannot be known until the store has loaded.
///
/// Keeps "not loaded yet" distinct from "loaded and absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum LoadState<T> {
    NotLoaded,
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::NotLoaded => LoadState::NotLoaded,
            Self::Loaded(value) => LoadState::Loaded(f(value)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Returns the loaded value, or `None` while still loading.
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::NotLoaded => None,
            Self::Loaded(value) => Some(value),
        }
    }
}

impl<T> LoadState<Option<T>> {
    /// Flattens to the inner value. Only for callers that really do not care
    /// whether the store has loaded.
    pub fn flatten(self) -> Option<T> {
        self.loaded().flatten()
    }
}

/// Who the current user is, as a tagged variant instead of sentinel fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Identity {
    /// The store has not loaded yet.
    Unknown,
    /// Loaded, no session.
    Anonymous,
    /// A session that the guest predicate classifies as guest.
    Guest(SessionRecord),
    /// A non-guest session with a non-empty id.
    Authenticated(SessionRecord),
}

impl Identity {
    pub fn record(&self) -> Option<&SessionRecord> {
        match self {
            Self::Guest(record) | Self::Authenticated(record) => Some(record),
            Self::Unknown | Self::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}
