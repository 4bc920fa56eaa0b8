//! Storage layer for state snapshots.
//!
//! Persists the durable part of [`AppState`](crate::app::AppState) so a
//! logged-in session survives a restart. Storage sits outside the reducer:
//! the store never touches the disk, callers save and restore around it.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `models`: On-disk envelope separate from the application state

pub mod backend;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use models::{SnapshotEnvelope, SNAPSHOT_VERSION};
