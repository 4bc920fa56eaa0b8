//! Configuration parsing and startup.

use hangouts::{initialize, Action, Config, HangoutError, Storage};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn empty_map_uses_defaults() {
    let config = Config::from_map(&BTreeMap::new());
    assert_eq!(config, Config::default());
    assert!(config.snapshot_path().ends_with("state.json"));
    assert!(config.trace_file_path().ends_with("hangouts-otlp.json"));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = Config::from_map(&map(&[("snapshot_file", "  "), ("trace_level", "")]));
    assert_eq!(config.snapshot_file, PathBuf::from("state.json"));
    assert_eq!(config.trace_level, None);
}

#[test]
fn absolute_file_names_ignore_data_dir() {
    let config = Config::from_map(&map(&[
        ("data_dir", "/srv/hangouts"),
        ("snapshot_file", "/tmp/elsewhere.json"),
        ("trace_file", "traces/otlp.json"),
    ]));
    assert_eq!(config.snapshot_path(), PathBuf::from("/tmp/elsewhere.json"));
    assert_eq!(config.trace_file_path(), PathBuf::from("/srv/hangouts/traces/otlp.json"));
}

#[test]
fn toml_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hangouts.toml");
    std::fs::write(
        &path,
        "data_dir = \"/srv/hangouts\"\ntrace_level = \"hangouts=debug\"\n",
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/srv/hangouts"));
    assert_eq!(config.trace_level.as_deref(), Some("hangouts=debug"));
}

#[test]
fn non_string_toml_values_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hangouts.toml");
    std::fs::write(&path, "trace_level = 3\n").unwrap();

    assert!(matches!(Config::from_file(&path), Err(HangoutError::Config(_))));
}

#[test]
fn initialize_restores_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().join("data"),
        ..Config::default()
    };

    let (mut store, mut storage) = initialize(&config).unwrap();
    assert!(store.state().show_login);
    store.dispatch(&Action::ToggleAuth).unwrap();
    storage.save_snapshot(store.state()).unwrap();
    drop(storage);

    let (restored, _storage) = initialize(&config).unwrap();
    assert!(!restored.state().show_login);
    assert_eq!(restored.dispatched(), 0);
}
