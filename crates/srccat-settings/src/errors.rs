//! Settings error types.

use thiserror::Error;

/// Errors that can occur when loading or parsing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// Settings file path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid JSON or does not fit the schema.
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Settings file path.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Compiled defaults failed to round-trip through JSON.
    #[error("failed to encode default settings: {0}")]
    Json(#[from] serde_json::Error),
    /// A settings value was invalid (e.g., empty suffix list).
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
