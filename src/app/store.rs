//! The store: owner of the current state snapshot.
//!
//! [`Store`] holds the state behind an `Arc` and replaces it wholesale on each
//! successful dispatch. Readers holding an earlier snapshot keep seeing it
//! unchanged; a failed or ignored dispatch hands back the very same `Arc`.
//!
//! # Example
//!
//! ```rust
//! use hangouts::app::{Action, Store};
//! use std::sync::Arc;
//!
//! let mut store = Store::default();
//! let before = store.snapshot();
//!
//! let after = store.dispatch_json(r#"{"type":"NOT_AN_ACTION"}"#)?;
//! assert!(Arc::ptr_eq(&before, &after));
//!
//! store.dispatch(&Action::ToggleAuth)?;
//! assert!(!store.state().show_login);
//! # Ok::<(), hangouts::HangoutError>(())
//! ```

use super::{reduce, Action, AppState};
use crate::domain::error::Result;
use std::sync::Arc;

/// Subscriber notified after every state-changing dispatch.
type Listener = Box<dyn FnMut(&AppState, &Action) + Send>;

/// Owner of the application state.
pub struct Store {
    state: Arc<AppState>,
    listeners: Vec<Listener>,
    dispatched: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::new())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("dispatched", &self.dispatched)
            .finish()
    }
}

impl Store {
    /// Creates a store holding `initial`.
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Arc::new(initial),
            listeners: Vec::new(),
            dispatched: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Shared handle to the current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Number of actions that changed the state so far.
    #[must_use]
    pub const fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Registers a callback run after each dispatch that changed the state.
    pub fn subscribe(&mut self, listener: impl FnMut(&AppState, &Action) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Runs `action` through the reducer and publishes the result.
    ///
    /// The reducer works on a copy; the published snapshot is only replaced
    /// when the transition succeeds and changes something.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error. The current snapshot is left untouched.
    pub fn dispatch(&mut self, action: &Action) -> Result<Arc<AppState>> {
        let _span = tracing::debug_span!("dispatch", action_type = action.kind()).entered();

        let mut next = AppState::clone(&self.state);
        let changed = reduce(&mut next, action).map_err(|e| {
            tracing::warn!(action_type = action.kind(), error = %e, "action rejected");
            e
        })?;

        if !changed {
            tracing::trace!("action left state unchanged");
            return Ok(self.snapshot());
        }

        self.state = Arc::new(next);
        self.dispatched += 1;
        let state: &AppState = &self.state;
        for listener in &mut self.listeners {
            listener(state, action);
        }
        Ok(self.snapshot())
    }

    /// Parses a wire action and dispatches it.
    ///
    /// Unknown action types are ignored: the returned snapshot is the same
    /// `Arc` as before the call.
    ///
    /// # Errors
    ///
    /// Returns [`HangoutError::Validation`](crate::HangoutError::Validation) for
    /// malformed input, or the reducer's error.
    pub fn dispatch_json(&mut self, json: &str) -> Result<Arc<AppState>> {
        match Action::parse(json)? {
            Some(action) => self.dispatch(&action),
            None => Ok(self.snapshot()),
        }
    }
}
