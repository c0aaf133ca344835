//! Settings file persistence for the synergy optimizer.
//!
//! The whole session is stored as one pretty-printed JSON
//! [`PersistedState`] record. By default the file lives in the platform
//! config directory:
//!
//! - Linux: `~/.config/synergy/synergy_settings.json`
//! - macOS: `~/Library/Application Support/synergy/synergy_settings.json`
//! - Windows: `%APPDATA%\synergy\config\synergy_settings.json`
//!
//! A missing file is not an error; [`SettingsStore::load`] returns `None`
//! and the caller starts from defaults.

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use synergy_types::PersistedState;
use tracing::{debug, info, warn};

pub use error::StoreError;

/// File name of the settings record.
pub const SETTINGS_FILE_NAME: &str = "synergy_settings.json";

/// Application name used for the platform directories.
const APP_NAME: &str = "synergy";

/// Reads and writes the settings record at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// A store backed by `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// A store at the platform default location.
    pub fn default_location() -> Result<Self, StoreError> {
        let dirs =
            directories::ProjectDirs::from("", "", APP_NAME).ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE_NAME)))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, or `None` if the file does not exist yet.
    pub fn load(&self) -> Result<Option<PersistedState>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file");
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let state = serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "settings loaded");
        Ok(Some(state))
    }

    /// Write the record, creating parent directories as needed.
    ///
    /// The record goes to a temporary sibling first and is renamed over the
    /// target, so a failed write never truncates existing settings.
    pub fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(state).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&temp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(path = %temp_path.display(), error = %cleanup, "temporary settings file left behind");
            }
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
