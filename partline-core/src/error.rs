//! Error types for part lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading a single part file.
#[derive(Debug, Error)]
pub enum PartError {
    /// No candidate path exists for the requested name.
    #[error("LDraw file not found: {name} (expected at {path})")]
    NotFound {
        /// Name as requested.
        name: String,
        /// Fallback candidate that was reported.
        path: PathBuf,
    },

    /// The file exists but could not be read as UTF-8 text.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for part lookup.
pub type PartResult<T> = std::result::Result<T, PartError>;
