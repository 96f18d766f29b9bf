//! Operator command parsing and dispatch.
//!
//! Commands are plain prefix messages in guild channels:
//! `!setserver <guild_id>`, `!adduser <user_id>`, `!addall`. Every command
//! answers with a human-readable status line; configuration problems are
//! reported as replies, never as crashes.

use serenity::all::{Context, Message};

use crate::{
    bot::handler::Handler,
    error::{config::ConfigError, AppError},
    model::join::MembershipResult,
};

const COMMAND_PREFIX: char = '!';

const GUILD_NOT_SET_REPLY: &str = "Guild ID not set. Use `!setserver <id>` first.";

/// Handle message creation in a channel
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    // Only react to operator commands in guild channels (not DMs)
    if message.author.bot || message.guild_id.is_none() {
        return;
    }

    let Some(args) = message.content.trim().strip_prefix(COMMAND_PREFIX) else {
        return;
    };

    let mut parts = args.split_whitespace();
    let Some(command) = parts.next() else {
        return;
    };

    match command {
        "setserver" => set_server(handler, &ctx, &message, parts.next()).await,
        "adduser" => add_user(handler, &ctx, &message, parts.next()).await,
        "addall" => add_all(handler, &ctx, &message).await,
        _ => {}
    }
}

/// `!setserver <guild_id>` - set the bulk-join target guild
async fn set_server(handler: &Handler, ctx: &Context, message: &Message, arg: Option<&str>) {
    let Some(guild_id) = arg.and_then(|value| value.parse::<u64>().ok()) else {
        reply(ctx, message, "Usage: `!setserver <guild_id>`").await;
        return;
    };

    match handler.guild_config.set_guild_id(guild_id).await {
        Ok(()) => {
            tracing::info!(guild_id, "Target guild configured");
            reply(ctx, message, format!("Guild ID set to `{guild_id}`.")).await;
        }
        Err(e) => {
            tracing::error!("Failed to save guild id: {}", e);
            reply(ctx, message, "Failed to save the guild ID.").await;
        }
    }
}

/// `!adduser <user_id>` - add one authorized user to the target guild
async fn add_user(handler: &Handler, ctx: &Context, message: &Message, arg: Option<&str>) {
    let Some(user_id) = arg.and_then(|value| value.parse::<u64>().ok()) else {
        reply(ctx, message, "Usage: `!adduser <user_id>`").await;
        return;
    };

    let outcome = handler.bulk_service().join_one(&user_id.to_string()).await;
    match outcome {
        Ok(result) => {
            if result.is_success() {
                reply(
                    ctx,
                    message,
                    format!("Successfully added user `{user_id}` to the server."),
                )
                .await;
            } else if let MembershipResult::Failed { status, body } = result {
                reply(ctx, message, format!("Failed with status {status}: {body}")).await;
            }
        }
        Err(AppError::ConfigErr(ConfigError::GuildIdUnset)) => {
            reply(ctx, message, GUILD_NOT_SET_REPLY).await;
        }
        Err(AppError::NotFound(_)) => {
            reply(ctx, message, "User not found in OAuth records.").await;
        }
        Err(e) => {
            tracing::error!("Failed to add user {}: {}", user_id, e);
            reply(ctx, message, "Something went wrong adding that user.").await;
        }
    }
}

/// `!addall` - attempt to add every authorized user to the target guild
async fn add_all(handler: &Handler, ctx: &Context, message: &Message) {
    match handler.bulk_service().join_all().await {
        Ok(summary) if summary.attempted == 0 => {
            reply(ctx, message, "No OAuth users found.").await;
        }
        Ok(summary) => {
            let mut text = format!(
                "Finished. Success: {}, Failed: {}",
                summary.succeeded, summary.failed
            );
            if !summary.failures.is_empty() {
                let failed: Vec<String> = summary
                    .failures
                    .iter()
                    .map(|f| match f.status {
                        Some(status) => format!("`{}` ({status})", f.user_id),
                        None => format!("`{}` (no response)", f.user_id),
                    })
                    .collect();
                text.push_str(&format!("\nFailed users: {}", failed.join(", ")));
            }
            reply(ctx, message, text).await;
        }
        Err(AppError::ConfigErr(ConfigError::GuildIdUnset)) => {
            reply(ctx, message, GUILD_NOT_SET_REPLY).await;
        }
        Err(e) => {
            tracing::error!("Bulk join failed to start: {}", e);
            reply(ctx, message, "Bulk join failed before any user was attempted.").await;
        }
    }
}

async fn reply(ctx: &Context, message: &Message, content: impl Into<String>) {
    if let Err(e) = message.channel_id.say(&ctx.http, content).await {
        tracing::error!("Failed to send reply: {:?}", e);
    }
}
