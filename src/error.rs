//! Error types for confkit
//!
//! Building a schema never fails. Errors only come out of the operations
//! that touch the outside world (serialization, files) or that check a
//! finished schema for consistency.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for confkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for confkit
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize schema: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse schema: {0}")]
    Parse(String),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(String),

    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Invalid schema at '{path}': {reason}")]
    InvalidSchema { path: String, reason: String },

    #[error("Schema path not found: {0}")]
    PathNotFound(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PathNotFound(_))
    }

    /// Check if this error came from schema linting
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::InvalidSchema { .. })
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================

/// Read a file to string with proper error handling
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write content to a file with proper error handling
pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
