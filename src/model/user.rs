//! User credential models.
//!
//! Provides the persisted record for an authorized Discord user and the
//! transient pairing of that record with its resolved user id produced by the
//! OAuth code exchange.

use serde::{Deserialize, Serialize};

/// A saved OAuth credential for one Discord user.
///
/// Serialized verbatim into the credential document, keyed by the user's
/// Discord id. The access token is an opaque bearer secret granting the bot
/// the ability to add the user to a guild; it is never empty once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Discord username.
    pub username: String,
    /// Optional display name shown in place of the username.
    pub global_name: Option<String>,
    /// OAuth access token authorized with the `guilds.join` scope.
    pub access_token: String,
}

/// The outcome of a successful OAuth code exchange.
///
/// Pairs the resolved Discord user id with the credential record assembled
/// from the token and identity responses. Persisting the record is the
/// caller's responsibility; the exchange itself has no storage side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedUser {
    /// Discord id of the user who completed the login.
    pub id: String,
    /// Credential record to persist under that id.
    pub record: UserRecord,
}

impl AuthorizedUser {
    /// Human-readable identity line used by the callback confirmation page.
    pub fn display_name(&self) -> &str {
        self.record
            .global_name
            .as_deref()
            .unwrap_or(&self.record.username)
    }
}
