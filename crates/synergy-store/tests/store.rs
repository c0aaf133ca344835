//! Integration tests for [`SettingsStore`] against a temporary directory.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;

use synergy_store::{SETTINGS_FILE_NAME, SettingsStore, StoreError};
use synergy_types::{PageId, PersistedState};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(dir.path().join("nested").join(SETTINGS_FILE_NAME))
}

#[test]
fn missing_file_loads_as_none() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_creates_directories_and_reloads() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut state = PersistedState::default();
    state.set_page(
        PageId::new(2).unwrap(),
        vec![3, 3, 3, 2, 2, 1, 1],
        vec![1500.0, 900.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
    state.total_units = 250;
    state.inputs.pro_energy_trophy = true;
    state.inputs.max_stage = Some(512);

    store.save(&state).unwrap();
    assert!(store.path().exists());
    assert!(!store.path().with_extension("json.tmp").exists());

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded, state);
}

#[test]
fn saved_file_uses_the_legacy_key_names() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(&PersistedState::default()).unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"page 1 levels\""));
    assert!(raw.contains("\"total bd\""));
    assert!(raw.contains("\"inputs dict\""));
}

#[test]
fn corrupt_file_is_a_json_error() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::new(dir.path().join(SETTINGS_FILE_NAME));
    fs::write(store.path(), "{ not json").unwrap();
    assert!(matches!(store.load(), Err(StoreError::Json { .. })));
}

#[test]
fn saving_twice_overwrites() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut state = PersistedState::default();
    store.save(&state).unwrap();
    state.total_units = 7;
    store.save(&state).unwrap();
    assert_eq!(store.load().unwrap().unwrap().total_units, 7);
}

#[test]
fn failed_rename_cleans_up_the_temporary_file() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::new(dir.path().join(SETTINGS_FILE_NAME));
    // A non-empty directory at the target path makes the final rename fail.
    fs::create_dir_all(store.path().join("occupied")).unwrap();

    let result = store.save(&PersistedState::default());
    assert!(matches!(result, Err(StoreError::Io { .. })));
    assert!(!store.path().with_extension("json.tmp").exists());
    assert!(store.path().is_dir());
}
