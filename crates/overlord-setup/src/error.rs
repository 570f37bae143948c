//! Setup error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for setup operations.
pub type SetupResult<T> = Result<T, SetupError>;

/// Errors that can occur while building or loading a worker behavior config.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SetupError {
    /// Whether this error means the configuration itself was rejected,
    /// as opposed to failing to be read.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, SetupError::Io { .. })
    }
}
