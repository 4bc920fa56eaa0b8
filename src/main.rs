//! Replay driver for the hangout state store.
//!
//! Reads one JSON action per line from stdin, feeds each through the store,
//! saves the resulting snapshot and prints a JSON summary to stdout.
//!
//! ```text
//! hangouts [key=value ...] [config.toml] < actions.jsonl
//! ```
//!
//! Arguments of the form `key=value` are configuration pairs (see
//! [`hangouts::Config::from_map`]); a bare argument names a TOML config file
//! whose values the pairs override.
//!
//! # Line Outcomes
//!
//! - **applied**: the action changed the state
//! - **unchanged**: the action was valid but a no-op
//! - **ignored**: the action type is not part of the vocabulary
//! - **rejected**: malformed JSON, failed validation, or a missing target

#![allow(clippy::multiple_crate_versions)]

use hangouts::ui::ResultsView;
use hangouts::{Action, Config, HangoutError, Storage};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Tally {
    applied: usize,
    unchanged: usize,
    ignored: usize,
    rejected: usize,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hangouts: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> hangouts::Result<()> {
    let config = parse_args(std::env::args().skip(1))?;
    hangouts::observability::init_tracing(&config);

    let span = tracing::info_span!("replay", snapshot = ?config.snapshot_path());
    let _guard = span.enter();

    let (mut store, mut storage) = hangouts::initialize(&config)?;
    let mut tally = Tally::default();

    for (index, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let action = match Action::parse(line) {
            Ok(Some(action)) => action,
            Ok(None) => {
                tracing::debug!(line = index + 1, "ignoring unknown action type");
                tally.ignored += 1;
                continue;
            }
            Err(e) => {
                eprintln!("line {}: {e}", index + 1);
                tally.rejected += 1;
                continue;
            }
        };

        let before = store.snapshot();
        match store.dispatch(&action) {
            Ok(after) if Arc::ptr_eq(&before, &after) => tally.unchanged += 1,
            Ok(_) => tally.applied += 1,
            Err(e) => {
                eprintln!("line {} ({}): {e}", index + 1, action.kind());
                tally.rejected += 1;
            }
        }
    }

    storage.save_snapshot(store.state())?;
    tracing::info!(?tally, "replay finished");

    let summary = serde_json::json!({
        "applied": tally.applied,
        "unchanged": tally.unchanged,
        "ignored": tally.ignored,
        "rejected": tally.rejected,
        "snapshot": storage.path().display().to_string(),
        "results": ResultsView::compute(store.state(), None),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Builds the configuration from a config file and `key=value` overrides.
fn parse_args(args: impl Iterator<Item = String>) -> hangouts::Result<Config> {
    let mut pairs = BTreeMap::new();
    let mut file = None;

    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => {
                pairs.insert(key.trim().to_string(), value.to_string());
            }
            None if file.is_none() => file = Some(arg),
            None => {
                return Err(HangoutError::Config(format!(
                    "unexpected argument '{arg}': only one config file may be given"
                )))
            }
        }
    }

    let mut merged = match file {
        Some(path) => Config::read_map(std::path::Path::new(&path))?,
        None => BTreeMap::new(),
    };
    merged.extend(pairs);
    Ok(Config::from_map(&merged))
}
