//! On-disk record types for the snapshot store.
//!
//! Kept apart from [`AppState`] so the file format can carry its own metadata
//! (format version, save time) without leaking into the application layer.

use crate::app::AppState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current snapshot file format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Top-level structure of the snapshot file.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "saved_at": "2024-05-01T18:30:00Z",
///   "state": { "active_view": "results", "user": { "email": "lily@email.com" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    /// Format version the file was written with.
    pub version: u32,

    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,

    /// Durable part of the application state.
    pub state: AppState,
}

impl SnapshotEnvelope {
    /// Wraps the durable part of `state`, stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use hangouts::app::AppState;
    /// use hangouts::storage::SnapshotEnvelope;
    ///
    /// let mut state = AppState::new();
    /// state.show_event = true;
    ///
    /// let envelope = SnapshotEnvelope::new(&state);
    /// assert_eq!(envelope.version, 1);
    /// assert!(!envelope.state.show_event);
    /// ```
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            state: state.persisted(),
        }
    }
}
