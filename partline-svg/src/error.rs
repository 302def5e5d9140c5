//! Error types for render configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a render config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has mistyped fields.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for config loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
