//! Error types for the `synergy-store` crate.

use std::path::PathBuf;

/// Errors from reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The platform has no usable config directory (no home directory).
    #[error("no config directory available on this platform")]
    NoConfigDir,

    /// Reading or writing a file failed.
    #[error("settings I/O failed for {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file content is not a valid settings record.
    #[error("settings JSON is invalid in {}: {source}", path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
