//! Discord bot integration for operator commands.
//!
//! The bot is the command surface for the guild-join workflow: operators set
//! the target guild and trigger single or bulk joins from chat. It is started
//! during server startup and runs in a separate tokio task so it never blocks
//! the HTTP listener. The bot shares the HTTP client and both stores with the
//! web side.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability events
//! - `GUILD_MESSAGES` - Receive messages in guild channels
//! - `MESSAGE_CONTENT` - Read message text to parse commands (privileged
//!   intent; must be enabled in the Discord Developer Portal)

pub mod handler;
pub mod start;
