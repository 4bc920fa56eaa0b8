//! Storage backend abstraction.
//!
//! The [`Storage`] trait is the seam between the store and wherever state
//! snapshots live between launches. Each method maps to one moment in the
//! client's lifecycle: restore on start, save after a session, clear on logout.

use crate::app::AppState;
use crate::domain::error::Result;

/// Abstraction over snapshot persistence backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use hangouts::app::AppState;
/// use hangouts::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/hangouts/state.json"))?;
/// storage.save_snapshot(&AppState::new())?;
/// assert!(storage.load_snapshot()?.is_some());
/// # Ok::<(), hangouts::HangoutError>(())
/// ```
pub trait Storage: Send {
    /// Returns the last saved snapshot, or `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load_snapshot(&self) -> Result<Option<AppState>>;

    /// Persists the durable part of `state`, replacing any earlier snapshot.
    ///
    /// Transient UI (modals, open chat) is dropped; see
    /// [`AppState::persisted`].
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Backends may keep the unsaved
    /// snapshot and retry later.
    fn save_snapshot(&mut self, state: &AppState) -> Result<()>;

    /// Forgets the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be modified.
    fn clear(&mut self) -> Result<()>;
}
