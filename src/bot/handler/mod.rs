use std::sync::Arc;

use serenity::all::{Context, EventHandler, Message, Ready};
use serenity::async_trait;

use crate::{
    config::Config,
    data::{guild::GuildConfigStore, user::UserStore},
    service::bulk::BulkJoinService,
};

pub mod command;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub config: Arc<Config>,
    pub http_client: reqwest::Client,
    pub user_store: UserStore,
    pub guild_config: GuildConfigStore,
}

impl Handler {
    pub fn new(
        config: Arc<Config>,
        http_client: reqwest::Client,
        user_store: UserStore,
        guild_config: GuildConfigStore,
    ) -> Self {
        Self {
            config,
            http_client,
            user_store,
            guild_config,
        }
    }

    /// Builds the join orchestrator over the handler's shared resources.
    pub(crate) fn bulk_service(&self) -> BulkJoinService<'_> {
        BulkJoinService::new(
            &self.user_store,
            &self.guild_config,
            &self.http_client,
            &self.config,
        )
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called for every message the bot can see; parses operator commands
    async fn message(&self, ctx: Context, message: Message) {
        command::handle_message(self, ctx, message).await;
    }
}
