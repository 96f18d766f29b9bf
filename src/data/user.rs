//! Credential store for authorized users.
//!
//! This module provides the `UserStore` for managing saved OAuth records in the
//! credential document. It is the single source of truth for "who has
//! authorized": mutated only when a code exchange succeeds, read by the bulk
//! join orchestrator and the listing endpoint.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::data::{read_json_or_default, write_json_atomic};
use crate::error::storage::StorageError;
use crate::model::user::UserRecord;

/// Store providing durable access to saved OAuth credentials.
///
/// Backed by a single JSON document mapping Discord user id to `UserRecord`.
/// Safe to query before first use: a missing document reads as an empty store.
#[derive(Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Creates a store handle for the credential document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the full credential document.
    ///
    /// # Returns
    /// - `Ok(map)` - Current contents, empty if the document is missing or malformed
    /// - `Err(StorageError)` - The document exists but could not be read
    pub async fn load_all(&self) -> Result<BTreeMap<String, UserRecord>, StorageError> {
        read_json_or_default(&self.path).await
    }

    /// Looks up the saved record for one user.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the user
    ///
    /// # Returns
    /// - `Ok(Some(record))` - The user has authorized
    /// - `Ok(None)` - No record stored for that id
    /// - `Err(StorageError)` - The document exists but could not be read
    pub async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, StorageError> {
        let users = self.load_all().await?;
        Ok(users.get(user_id).cloned())
    }

    /// Inserts or replaces the record for one user, durably.
    ///
    /// The full document is rewritten atomically; the write has been flushed to
    /// its final path before this returns. A failure here means the credential
    /// was not persisted and is surfaced to the caller.
    ///
    /// # Arguments
    /// - `user_id` - Discord id of the user
    /// - `record` - Credential record to store under that id
    pub async fn upsert(&self, user_id: &str, record: UserRecord) -> Result<(), StorageError> {
        let mut users = self.load_all().await?;
        users.insert(user_id.to_string(), record);
        write_json_atomic(&self.path, &users).await
    }

    /// Returns a snapshot of every saved credential.
    ///
    /// Iteration order is not meaningful to callers.
    pub async fn list_all(&self) -> Result<Vec<(String, UserRecord)>, StorageError> {
        let users = self.load_all().await?;
        Ok(users.into_iter().collect())
    }
}
