//! File-backed store layer for all persisted state.
//!
//! This module contains the stores that own the application's two durable JSON
//! documents: the credential map and the guild configuration. Stores are cheap
//! value handles (a path each) created once at startup and threaded through the
//! HTTP state and the bot handler; no business logic touches the filesystem
//! directly.
//!
//! Writes are atomic (temp file then rename) so a reader always observes either
//! the fully-old or fully-new document, and a crash mid-write can never leave a
//! torn file behind. Reads of a missing or malformed document degrade to an
//! empty store; any other I/O failure surfaces as a `StorageError`.

pub mod guild;
pub mod user;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::storage::StorageError;

/// Writes a JSON document atomically via a sibling temp file and rename.
pub(crate) async fn write_json_atomic<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
    }

    let data = serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = tmp_path(path);
    tokio::fs::write(&tmp, data.as_bytes())
        .await
        .map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;

    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

/// Reads a JSON document, treating a missing or malformed file as the default
/// value.
///
/// Only that narrow case degrades: other read failures (e.g. permissions) are
/// surfaced so callers don't mistake an unreadable medium for an empty store.
pub(crate) async fn read_json_or_default<T: DeserializeOwned + Default>(
    path: &Path,
) -> Result<T, StorageError> {
    match tokio::fs::read_to_string(path).await {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed store document, treating as empty");
                Ok(T::default())
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(source) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}
