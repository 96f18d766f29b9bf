use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::{
    bot::handler::Handler,
    config::Config,
    data::{guild::GuildConfigStore, user::UserStore},
    error::AppError,
};

/// Starts the Discord bot in a blocking manner
///
/// This function creates and starts the Discord bot client. It should be called
/// from within a tokio::spawn task since it will block until the bot shuts down.
///
/// # Arguments
/// - `config` - Application configuration, including the bot token
/// - `http_client` - Shared HTTP client for Discord REST calls
/// - `user_store` - Credential store read by the join commands
/// - `guild_config` - Target guild store read and written by the commands
///
/// # Returns
/// - `Ok(())` if the bot starts and runs until shutdown
/// - `Err(AppError)` if bot initialization or connection fails
pub async fn start_bot(
    config: Arc<Config>,
    http_client: reqwest::Client,
    user_store: UserStore,
    guild_config: GuildConfigStore,
) -> Result<(), AppError> {
    // MESSAGE_CONTENT is a privileged intent - must be enabled in the Discord
    // Developer Portal
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler::new(config.clone(), http_client, user_store, guild_config);

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    // Start the bot (this blocks until shutdown)
    client.start().await?;

    Ok(())
}
