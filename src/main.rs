mod bot;
mod config;
mod controller;
mod data;
mod error;
mod model;
mod router;
mod service;
mod startup;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::{config::Config, error::AppError, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Arc::new(Config::from_env()?);
    let http_client = startup::setup_reqwest_client()?;
    let (user_store, guild_config) = startup::open_stores(&config);

    // Start the Discord bot in a separate task
    {
        let config = config.clone();
        let http_client = http_client.clone();
        let user_store = user_store.clone();
        tokio::spawn(async move {
            if let Err(e) = bot::start::start_bot(config, http_client, user_store, guild_config).await
            {
                tracing::error!("Discord bot error: {}", e);
            }
        });
    }

    let state = AppState::new(config.clone(), http_client, user_store);
    let app = router::router().with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
