use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    data::{guild::GuildConfigStore, user::UserStore},
    error::AppError,
};

const USERS_FILENAME: &str = "users.json";
const CONFIG_FILENAME: &str = "config.json";

/// Initializes the tracing subscriber, honoring `RUST_LOG` when set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "guildgate=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Builds the HTTP client used for all Discord API calls.
///
/// Redirects are disabled so a malicious redirect chain can never carry our
/// credentials to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Opens the two durable stores inside the configured data directory.
pub fn open_stores(config: &Config) -> (UserStore, GuildConfigStore) {
    let user_store = UserStore::new(config.data_dir.join(USERS_FILENAME));
    let guild_config = GuildConfigStore::new(config.data_dir.join(CONFIG_FILENAME));

    (user_store, guild_config)
}
