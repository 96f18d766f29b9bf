//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each
//! request handler through Axum's state extraction. All fields are cheap to
//! clone: the stores are path handles, `reqwest::Client` uses an `Arc`
//! internally, and the configuration is reference-counted.

use std::sync::Arc;

use crate::{config::Config, data::user::UserStore};

/// Application state containing shared resources and dependencies.
///
/// The guild-config store is deliberately absent: the target guild is only
/// read and written through the bot's commands, so the HTTP side never
/// touches it.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, including OAuth client settings and the
    /// Discord endpoint URLs.
    pub config: Arc<Config>,

    /// HTTP client for Discord API requests.
    ///
    /// Configured with redirects disabled to prevent SSRF via redirect
    /// chains. Shared with the bot handler.
    pub http_client: reqwest::Client,

    /// Credential store holding every authorized user's OAuth record.
    pub user_store: UserStore,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    pub fn new(config: Arc<Config>, http_client: reqwest::Client, user_store: UserStore) -> Self {
        Self {
            config,
            http_client,
            user_store,
        }
    }
}
