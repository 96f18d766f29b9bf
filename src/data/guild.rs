//! Guild configuration store.
//!
//! Holds the single durable value the orchestrator depends on: the id of the
//! guild users should be added to. Mutated only by the bot's `!setserver`
//! command.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::{read_json_or_default, write_json_atomic};
use crate::error::storage::StorageError;

/// On-disk shape of the guild configuration document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct GuildConfigDocument {
    guild_id: Option<u64>,
}

/// Store providing durable access to the target guild id.
///
/// Backed by a single JSON document. Operations that need a guild id observe
/// `None` until one has been set; a missing or malformed document also reads
/// as unset.
#[derive(Clone)]
pub struct GuildConfigStore {
    path: PathBuf,
}

impl GuildConfigStore {
    /// Creates a store handle for the guild configuration document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the configured target guild id.
    ///
    /// # Returns
    /// - `Ok(Some(id))` - A target guild has been configured
    /// - `Ok(None)` - No guild configured yet (or document missing/malformed)
    /// - `Err(StorageError)` - The document exists but could not be read
    pub async fn get_guild_id(&self) -> Result<Option<u64>, StorageError> {
        let document: GuildConfigDocument = read_json_or_default(&self.path).await?;
        Ok(document.guild_id)
    }

    /// Sets the target guild id, durably.
    ///
    /// The document is rewritten atomically; the write has been flushed to its
    /// final path before this returns.
    pub async fn set_guild_id(&self, guild_id: u64) -> Result<(), StorageError> {
        let document = GuildConfigDocument {
            guild_id: Some(guild_id),
        };
        write_json_atomic(&self.path, &document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests setting and reading back the guild id.
    ///
    /// Verifies that set_guild_id persists the value and get_guild_id
    /// returns it.
    ///
    /// Expected: Ok with the configured id
    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = GuildConfigStore::new(dir.path().join("config.json"));

        store.set_guild_id(42).await.unwrap();
        assert_eq!(store.get_guild_id().await.unwrap(), Some(42));
    }

    /// Tests reading before any configuration.
    ///
    /// Verifies that a missing document reads as unset rather than erroring,
    /// so the orchestrator can fail cleanly instead of crashing.
    ///
    /// Expected: Ok with None
    #[tokio::test]
    async fn missing_document_reads_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let store = GuildConfigStore::new(dir.path().join("config.json"));

        assert_eq!(store.get_guild_id().await.unwrap(), None);
    }

    /// Tests reading a corrupted document.
    ///
    /// Expected: Ok with None
    #[tokio::test]
    async fn malformed_document_reads_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, b"{{{").await.unwrap();

        let store = GuildConfigStore::new(path);
        assert_eq!(store.get_guild_id().await.unwrap(), None);
    }

    /// Tests overwriting a previously configured guild id.
    ///
    /// Expected: Ok with the last-written id
    #[tokio::test]
    async fn set_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = GuildConfigStore::new(dir.path().join("config.json"));

        store.set_guild_id(1).await.unwrap();
        store.set_guild_id(2).await.unwrap();
        assert_eq!(store.get_guild_id().await.unwrap(), Some(2));
    }
}
