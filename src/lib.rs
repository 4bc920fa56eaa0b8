//! Hangouts: the client-side state store of a hangout scheduling app.
//!
//! The crate holds everything the client knows about the logged-in user,
//! other users, chats, events and hangouts, and changes it only through a
//! closed set of typed actions:
//! - A pure reducer over a single normalized state aggregate
//! - A store publishing immutable snapshots to views and subscribers
//! - View models for the results screen and a validated signup form
//! - JSON snapshot persistence so a session survives restarts

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Replay binary (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Action vocabulary and wire format                │
//! │  - Reducer                                          │
//! │  - Store and snapshots                              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │
//! │ (ui/)         │   │ (storage/)    │
//! │ - View models │   │ - JSON I/O    │
//! │ - Results     │   │ - Envelope    │
//! │ - Signup form │   │ - Backend API │
//! └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory paths (infrastructure/)           │
//! │  - Error types (domain/error)                       │
//! │  - Users, chats, events, hangouts (domain/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: State, actions, reducer and store
//! - [`domain`]: Entity types and errors
//! - [`infrastructure`]: Platform paths
//! - [`storage`]: Snapshot persistence
//! - [`ui`]: Results screen and signup form
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Configuration is a flat set of string keys, given as `key=value` pairs on
//! the command line or as a TOML file:
//!
//! ```toml
//! data_dir = "~/.local/share/hangouts"
//! snapshot_file = "state.json"
//! trace_level = "debug"
//! trace_file = "hangouts-otlp.json"
//! ```
//!
//! # Example
//!
//! ```rust
//! use hangouts::{initialize, Action, Config, Storage};
//!
//! let dir = tempfile::tempdir()?;
//! let config = Config { data_dir: dir.path().to_path_buf(), ..Config::default() };
//!
//! let (mut store, mut storage) = initialize(&config)?;
//! store.dispatch(&Action::ToggleAuth)?;
//! storage.save_snapshot(store.state())?;
//!
//! let (restored, _) = initialize(&config)?;
//! assert!(!restored.state().show_login);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{Action, AppState, Store};
pub use domain::{HangoutError, Result};
pub use storage::{JsonStorage, Storage};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default snapshot file name inside the data directory.
pub const DEFAULT_SNAPSHOT_FILE: &str = "state.json";

/// Default trace file name inside the data directory.
pub const DEFAULT_TRACE_FILE: &str = "hangouts-otlp.json";

/// Runtime configuration.
///
/// # Example
///
/// ```text
/// hangouts data_dir=~/hangouts-data trace_level=debug < actions.jsonl
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the snapshot and trace files.
    ///
    /// Default: [`infrastructure::get_data_dir`].
    pub data_dir: PathBuf,

    /// Snapshot file, relative to `data_dir` unless absolute.
    pub snapshot_file: PathBuf,

    /// Tracing filter directive for exported spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Trace file, relative to `data_dir` unless absolute.
    pub trace_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::get_data_dir(),
            snapshot_file: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            trace_level: None,
            trace_file: PathBuf::from(DEFAULT_TRACE_FILE),
        }
    }
}

impl Config {
    /// Parses configuration from string key/value pairs.
    ///
    /// Unknown keys are ignored and empty values fall back to defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: path, leading `~` expanded
    /// - `snapshot_file`: path
    /// - `trace_level`: String → `Option<String>`
    /// - `trace_file`: path
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::path::PathBuf;
    /// use hangouts::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/tmp/hangouts".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.snapshot_path(), PathBuf::from("/tmp/hangouts/state.json"));
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| non_empty(config, key);
        let defaults = Self::default();

        Self {
            data_dir: value("data_dir").map_or(defaults.data_dir, infrastructure::expand_tilde),
            snapshot_file: value("snapshot_file").map_or(defaults.snapshot_file, PathBuf::from),
            trace_level: value("trace_level").map(String::from),
            trace_file: value("trace_file").map_or(defaults.trace_file, PathBuf::from),
        }
    }

    /// Reads configuration from a TOML file of string keys.
    ///
    /// # Errors
    ///
    /// Returns [`HangoutError::Io`] if the file cannot be read and
    /// [`HangoutError::Config`] if it is not a table of string values.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::from_map(&Self::read_map(path)?))
    }

    /// Reads the raw key/value pairs of a TOML config file.
    ///
    /// Lets callers layer overrides on top before calling [`Config::from_map`].
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_file`].
    pub fn read_map(path: &Path) -> Result<BTreeMap<String, String>> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            HangoutError::Config(format!("invalid config file {}: {e}", path.display()))
        })
    }

    /// Full path of the snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    /// Full path of the trace file.
    #[must_use]
    pub fn trace_file_path(&self) -> PathBuf {
        self.data_dir.join(&self.trace_file)
    }
}

fn non_empty<'a>(config: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    config
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Opens snapshot storage and builds a store from the last saved snapshot.
///
/// Starts from [`AppState::new`] when nothing was saved yet.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the snapshot
/// file exists but cannot be read.
pub fn initialize(config: &Config) -> Result<(Store, JsonStorage)> {
    let _span = tracing::debug_span!("initialize", data_dir = ?config.data_dir).entered();

    let storage = JsonStorage::new(config.snapshot_path())?;
    let state = match storage.load_snapshot()? {
        Some(state) => {
            tracing::info!(user = %state.user.email, "restored snapshot");
            state
        }
        None => {
            tracing::debug!("starting with empty state");
            AppState::new()
        }
    };

    Ok((Store::new(state), storage))
}
