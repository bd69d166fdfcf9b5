//! Error types for catalog loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or validating the catalog.
///
/// Every variant is fatal at startup: the generator never runs against a
/// partial catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required data file does not exist.
    #[error("Missing required data file: {}", path.display())]
    MissingFile {
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// A data file exists but could not be read.
    #[error("Failed to read data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid JSON for its schema.
    #[error("Failed to parse JSON file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two entries share the same key.
    #[error("Duplicate catalog key: {0}")]
    DuplicateKey(String),

    /// An entry violates a structural invariant.
    #[error("Catalog entry '{key}' is invalid: {reason}")]
    InvalidEntry {
        /// Key of the offending entry
        key: String,
        /// Description of the violated invariant
        reason: String,
    },
}
