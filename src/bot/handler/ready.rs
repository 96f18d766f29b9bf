use serenity::all::{ActivityData, Context, Ready};

/// Handle the bot coming online
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord!", ready.user.name);

    ctx.set_activity(Some(ActivityData::listening("!addall")));
}
