//! Trade journal web server.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use shared::{Config, InMemoryTradeRepository, TradeService};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod forms;
mod handlers;
mod seed;
mod state;
mod views;

use handlers::{
    add_follow_up, create_trade, delete_trade, edit_trade, index, new_trade, show_trade,
    update_trade,
};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let repo = Arc::new(InMemoryTradeRepository::new());
    let service = TradeService::new(repo);
    seed::maybe_seed(&service, config.seed_sample_data).await?;

    let state = AppState::new(service);

    let app = Router::new()
        .route("/", get(index))
        .route("/trades", post(create_trade))
        .route("/trades/new", get(new_trade))
        .route("/trades/:id", get(show_trade))
        .route("/trades/:id/edit", get(edit_trade))
        .route("/trades/:id/update", post(update_trade))
        .route("/trades/:id/delete", post(delete_trade))
        .route("/trades/:id/followups", post(add_follow_up))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "trade journal listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
