use std::path::PathBuf;

use thiserror::Error;

/// Failures from the JSON-file store layer.
///
/// Reads of a missing or malformed document degrade to an empty store inside
/// the data layer and never produce these errors; anything else (permission
/// problems, failed writes) is surfaced so the caller knows durability was not
/// achieved.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the store document.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store document could not be written or replaced.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path of the store document.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store contents could not be serialized to JSON.
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        /// Path of the store document.
        path: PathBuf,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
