//! Size-rotated append-only file for trace export.
//!
//! Each exported batch is one line. Once the file passes its size limit it
//! is renamed to `<file name>.<timestamp>` and a fresh file is started; only
//! the newest few backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size limit before rotation (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups retained.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write, so construction never
/// fails. Writes from several threads are serialized by an internal mutex.
///
/// # Rotation
///
/// 1. Before each write, check the size of the live file
/// 2. Past `max_bytes`, rename it to `<name>.<timestamp>` and start a new one
/// 3. Delete all but the newest `max_backups` renamed files
///
/// # Example
///
/// ```rust,ignore
/// let writer = RotatingFile::new("/tmp/hangouts-otlp.json".into());
/// writer.write_line(r#"{"resourceSpans":[]}"#)?;
/// ```
pub struct RotatingFile {
    /// Live file path.
    path: PathBuf,
    /// Size past which the next write rotates.
    max_bytes: u64,
    /// Rotated files kept on disk.
    max_backups: usize,
    /// Lazily opened handle; reset on rotation.
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Creates a writer with the default limits.
    ///
    /// # Parameters
    ///
    /// * `path` - Live file path; created on the first write
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS)
    }

    /// Creates a writer rotating after `max_bytes` and keeping `max_backups` old files.
    ///
    /// # Parameters
    ///
    /// * `path` - Live file path; created on the first write
    /// * `max_bytes` - Size past which the next write rotates
    /// * `max_backups` - Number of rotated files kept
    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            handle: Mutex::new(None),
        }
    }

    /// Path of the live file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// The line is flushed before returning.
    ///
    /// # Parameters
    ///
    /// * `line` - One encoded batch, without a trailing newline
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the line was written and flushed
    /// - `Err(io::Error)` otherwise
    ///
    /// # Errors
    ///
    /// Fails on I/O errors while rotating, opening or writing, and when the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self.handle.lock().map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}"))
        })?;

        if self.is_full() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file unavailable"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    /// Returns `true` once the live file has grown past `max_bytes`.
    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    /// Renames the live file to a timestamped backup and prunes old backups.
    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%6f");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        if self.path.exists() {
            fs::rename(&self.path, PathBuf::from(backup))?;
        }
        self.prune_backups()
    }

    /// Deletes all but the newest `max_backups` rotated files.
    fn prune_backups(&self) -> io::Result<()> {
        let (Some(dir), Some(name)) = (
            self.path.parent(),
            self.path.file_name().and_then(|n| n.to_str()),
        ) else {
            return Ok(());
        };
        let prefix = format!("{name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();

        // Timestamps sort lexically; newest first.
        backups.sort_unstable_by(|a, b| b.cmp(a));
        for stale in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
