//! `GET /api/news`.

use ainews_core::NewsBatch;
use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::handler::AppState;

/// Serve fresh news, or cached news when the provider is unavailable.
pub async fn get_news(State(state): State<AppState>) -> Result<Json<NewsBatch>, ApiError> {
    let batch = state.curator.get_news().await?;
    tracing::debug!(items = batch.len(), "serving news");
    Ok(Json(batch))
}
