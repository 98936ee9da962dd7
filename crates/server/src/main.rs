//! ai-news server entry point.
//!
//! Boots the HTTP server, opens the news store, and kicks off one background
//! fetch. Logging goes to stderr as JSON.

use ainews_core::AppConfig;
use anyhow::Result;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod routes;
mod startup;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let state = handler::AppState::from_config(&config).await?;

    if config.prime_on_startup {
        startup::spawn_prime(state.curator.clone());
    }

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, db_path = %config.db_path.display(), "Starting ai-news server");

    axum::serve(listener, handler::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
