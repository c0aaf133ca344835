//! Error types for the `synergy` binary.

use synergy_engine::{ConfigError, SynergyError};
use synergy_store::StoreError;

/// Errors surfaced to the command line.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The engine configuration could not be loaded.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The settings file could not be read or written.
    #[error("settings error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// The engine rejected an input.
    #[error("{source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: SynergyError,
    },

    /// A row strategy was requested without `--row`.
    #[error("strategy '{strategy}' needs --row")]
    MissingRow {
        /// The strategy name as typed.
        strategy: &'static str,
    },

    /// `init` would overwrite an existing settings file.
    #[error("settings file already exists at {path} (use --force to overwrite)")]
    AlreadyInitialized {
        /// The existing file.
        path: String,
    },

    /// Writing JSON output failed.
    #[error("failed to encode output: {source}")]
    Output {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
