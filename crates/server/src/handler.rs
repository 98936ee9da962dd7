//! HTTP router and shared state.
//!
//! This module wires the curator into axum routes.

use std::sync::Arc;

use ainews_client::{NewsApiClient, NewsApiConfig, NewsCurator};
use ainews_core::{AppConfig, NewsDb};
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub curator: NewsCurator,
}

impl AppState {
    pub fn new(curator: NewsCurator) -> Self {
        Self { curator }
    }

    /// Open the store and build the NewsAPI-backed curator.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let db = NewsDb::open(&config.db_path).await?;
        let client = NewsApiClient::new(NewsApiConfig::from(config))?;

        if !client.is_configured() {
            tracing::warn!("NewsAPI key missing; /api/news will serve cached items only");
        }

        let curator = NewsCurator::new(Arc::new(client), db).with_cache_limit(config.cache_limit);
        Ok(Self::new(curator))
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/news", get(routes::news::get_news))
        .route("/health", get(routes::health::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
