//! The process-wide session store.
//!
//! Owns the single cached `SessionState`, keeps it in step with the
//! repository, and tells subscribers when it changes.

use std::sync::Arc;
use tokio::sync::{Mutex, broadcast, watch};

use storefront_core::error::{Result, StorefrontError};
use storefront_core::session::{
    Access, Feature, Identity, LoadState, RegistrationStatus, SessionEvent, SessionRecord,
    SessionRepository, SessionState,
};

use crate::registration::RegistrationDetails;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Single source of truth for "who is the current user".
///
/// Created once at the application root and shared by reference. Mutations
/// (`load`, `save`, `update`, `clear`) are serialized in call order through a
/// fair async mutex, and the cache only changes after the repository call
/// succeeded. Reads never touch storage.
///
/// # Example
///
/// ```ignore
/// let store = SessionStore::init(Arc::new(repository)).await;
/// store.save(SessionRecord::new("42", "9876543210")).await?;
/// assert_eq!(store.is_logged_in(), LoadState::Loaded(true));
/// ```
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    /// Cached state. Also the change feed for `watch()` receivers.
    state: watch::Sender<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    /// Held for the whole read-modify-persist cycle of every mutation.
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Creates a store in the `Uninitialized` state. Call [`load`](Self::load)
    /// before trusting any read.
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            repository,
            state,
            events,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store and performs the startup load.
    pub async fn init(repository: Arc<dyn SessionRepository>) -> Self {
        let store = Self::new(repository);
        store.load().await;
        store
    }

    /// Ends the store's lifecycle.
    ///
    /// Watchers observe `Uninitialized` and then a closed channel; event
    /// subscribers observe a closed channel.
    pub fn dispose(self) {
        self.state.send_replace(SessionState::Uninitialized);
        tracing::debug!("[SessionStore] Disposed");
    }

    // ============================================================================
    // Lifecycle operations
    // ============================================================================

    /// Reads the persisted session and leaves `Uninitialized`.
    ///
    /// Never fails: unreadable or corrupt storage is logged and treated as
    /// "no session".
    pub async fn load(&self) -> SessionState {
        let _guard = self.write_lock.lock().await;

        let record = match self.repository.load().await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    "[SessionStore] Failed to load session, continuing logged out: {}",
                    e
                );
                None
            }
        };

        let next = SessionState::from_record(record.clone());
        tracing::debug!(
            "[SessionStore] Loaded session (present: {})",
            record.is_some()
        );
        self.publish(next.clone(), SessionEvent::Loaded { record });
        next
    }

    /// Replaces the whole session record.
    ///
    /// The record is validated before any I/O. The cache is only updated once
    /// the durable write succeeded; on failure the previous session stays
    /// current and the caller decides whether to retry.
    pub async fn save(&self, record: SessionRecord) -> Result<()> {
        record.validate().map_err(StorefrontError::invalid_record)?;

        let _guard = self.write_lock.lock().await;
        self.persist_locked(record).await
    }

    /// Saves the canonical guest record.
    pub async fn login_as_guest(&self) -> Result<()> {
        self.save(SessionRecord::guest()).await
    }

    /// Edits the current record and saves the result as a full replacement.
    ///
    /// Runs under the same serialization as `save`, so edits never interleave
    /// with other writes. Returns the record that was saved.
    pub async fn update<F>(&self, edit: F) -> Result<SessionRecord>
    where
        F: FnOnce(&mut SessionRecord) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut record = self.cached_record().ok_or(StorefrontError::NoSession)?;
        edit(&mut record);
        record.validate().map_err(StorefrontError::invalid_record)?;

        self.persist_locked(record.clone()).await?;
        Ok(record)
    }

    /// Records the profile-completion step.
    pub async fn complete_registration(
        &self,
        details: RegistrationDetails,
    ) -> Result<SessionRecord> {
        self.update(move |record| details.apply(record)).await
    }

    /// Removes the session.
    ///
    /// Clearing an empty store succeeds. If the durable removal fails the
    /// cached session is kept and the error is returned.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.repository.clear().await {
            tracing::error!("[SessionStore] Failed to clear session: {}", e);
            return Err(e);
        }

        tracing::debug!("[SessionStore] Session cleared");
        self.publish(SessionState::LoadedEmpty, SessionEvent::Cleared);
        Ok(())
    }

    /// Suspends until the first load has completed.
    pub async fn wait_until_loaded(&self) {
        let mut receiver = self.state.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close
        let _ = receiver.wait_for(SessionState::is_loaded).await;
    }

    // ============================================================================
    // Reads
    // ============================================================================

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().is_loaded()
    }

    /// Snapshot of the current record.
    pub fn current(&self) -> LoadState<Option<SessionRecord>> {
        self.state.borrow().record().map(|record| record.cloned())
    }

    pub fn identity(&self) -> Identity {
        self.state.borrow().identity()
    }

    /// Narrow check: a record with a non-empty id exists.
    pub fn is_logged_in(&self) -> LoadState<bool> {
        self.state.borrow().is_logged_in()
    }

    /// Guest classification of the current record.
    pub fn is_guest(&self) -> LoadState<bool> {
        self.state.borrow().is_guest()
    }

    pub fn access(&self, feature: Feature) -> Access {
        feature.access(&self.state.borrow())
    }

    pub fn get_user_id(&self) -> LoadState<Option<String>> {
        self.field(|record| Some(record.id.clone()))
    }

    pub fn get_user_mobile(&self) -> LoadState<Option<String>> {
        self.field(|record| record.mobile.clone())
    }

    pub fn get_user_name(&self) -> LoadState<Option<String>> {
        self.field(|record| record.name.clone())
    }

    pub fn get_user_email(&self) -> LoadState<Option<String>> {
        self.field(|record| record.email.clone())
    }

    pub fn get_user_type(&self) -> LoadState<Option<String>> {
        self.field(|record| record.user_type.clone())
    }

    pub fn get_secondary_mobile(&self) -> LoadState<Option<String>> {
        self.field(|record| record.secondary_mobile.clone())
    }

    pub fn get_city(&self) -> LoadState<Option<String>> {
        self.field(|record| record.city.clone())
    }

    pub fn get_location(&self) -> LoadState<Option<String>> {
        self.field(|record| record.location.clone())
    }

    pub fn get_registration_status(&self) -> LoadState<Option<RegistrationStatus>> {
        self.field(|record| record.registration_status)
    }

    // ============================================================================
    // Subscriptions
    // ============================================================================

    /// Discrete change events. Only changes after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Latest-state receiver, for consumers that only re-render.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn field<T>(&self, get: impl FnOnce(&SessionRecord) -> Option<T>) -> LoadState<Option<T>> {
        self.state.borrow().record().map(|record| record.and_then(get))
    }

    fn cached_record(&self) -> Option<SessionRecord> {
        match &*self.state.borrow() {
            SessionState::LoadedPresent(record) => Some(record.clone()),
            SessionState::Uninitialized | SessionState::LoadedEmpty => None,
        }
    }

    /// Writes through to the repository, then updates the cache.
    /// Caller must hold `write_lock`.
    async fn persist_locked(&self, record: SessionRecord) -> Result<()> {
        if let Err(e) = self.repository.save(&record).await {
            tracing::error!(
                "[SessionStore] Failed to save session '{}': {}",
                record.id,
                e
            );
            return Err(e);
        }

        tracing::debug!("[SessionStore] Saved session '{}'", record.id);
        self.publish(
            SessionState::LoadedPresent(record.clone()),
            SessionEvent::Saved { record },
        );
        Ok(())
    }

    /// Replaces the cached state and emits `event`.
    ///
    /// `watch` receivers are only woken when the state actually changed.
    /// Event subscribers hear about every completed load, save and clear.
    fn publish(&self, next: SessionState, event: SessionEvent) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });

        // No receivers is fine
        let _ = self.events.send(event);
    }
}
