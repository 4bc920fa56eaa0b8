//! JSON file-based snapshot storage.
//!
//! Keeps one human-readable snapshot file and rewrites it atomically
//! (write-to-temp + rename) so a crash never leaves a half-written file.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - the file is loaded into memory once, on open
//! - **Write**: O(n) - the whole snapshot is serialized on each save
//! - **Best for**: one snapshot per user, saved on shutdown or logout

use crate::app::AppState;
use crate::domain::error::{HangoutError, Result};
use crate::storage::backend::Storage;
use crate::storage::models::{SnapshotEnvelope, SNAPSHOT_VERSION};
use std::path::{Path, PathBuf};

/// JSON file snapshot backend.
///
/// The last snapshot is cached in memory. A snapshot that failed to write
/// stays marked dirty and is retried on the next save or on drop.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`; it is meant to be owned by whichever
/// thread drives the store.
#[derive(Debug)]
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// Snapshot loaded from or last written to disk.
    envelope: Option<SnapshotEnvelope>,

    /// Tracks if the cached snapshot has not reached the disk yet.
    dirty: bool,
}

impl JsonStorage {
    /// Opens the snapshot file at `file_path`, creating parent directories.
    ///
    /// A missing file is not an error; it means nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but is not a valid snapshot
    /// - The file was written by a newer format version
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening snapshot storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let envelope = if file_path.exists() {
            Some(Self::load_from_file(&file_path)?)
        } else {
            tracing::debug!("no snapshot on disk yet");
            None
        };

        Ok(Self {
            file_path,
            envelope,
            dirty: false,
        })
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<SnapshotEnvelope> {
        let contents = std::fs::read_to_string(path)?;
        let envelope: SnapshotEnvelope = serde_json::from_str(&contents)
            .map_err(|e| HangoutError::Storage(format!("failed to parse snapshot: {e}")))?;

        if envelope.version > SNAPSHOT_VERSION {
            return Err(HangoutError::Storage(format!(
                "snapshot version {} is newer than supported version {SNAPSHOT_VERSION}",
                envelope.version
            )));
        }

        tracing::debug!(
            version = envelope.version,
            saved_at = %envelope.saved_at,
            user = %envelope.state.user.email,
            "loaded snapshot"
        );
        Ok(envelope)
    }

    /// Writes the cached snapshot using temp file + rename.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }
        let Some(envelope) = &self.envelope else {
            self.dirty = false;
            return Ok(());
        };

        let json = serde_json::to_string_pretty(envelope)
            .map_err(|e| HangoutError::Storage(format!("failed to serialize snapshot: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "snapshot saved");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn load_snapshot(&self) -> Result<Option<AppState>> {
        Ok(self.envelope.as_ref().map(|e| e.state.clone()))
    }

    fn save_snapshot(&mut self, state: &AppState) -> Result<()> {
        let _span = tracing::debug_span!("json_save_snapshot",
            user = %state.user.email,
            events = state.all_events.len()
        )
        .entered();

        self.envelope = Some(SnapshotEnvelope::new(state));
        self.dirty = true;
        self.save_to_file()
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_snapshot").entered();

        self.envelope = None;
        self.dirty = false;
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty snapshot on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
