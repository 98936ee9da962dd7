//! Upstream news source abstraction.

use ainews_core::NewsItem;
use async_trait::async_trait;

use crate::newsapi::NewsApiError;

/// A provider of fresh news items.
///
/// The curator only depends on this trait, so the provider can be replaced
/// without touching the fallback logic.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch one batch of normalized, deduplicated items.
    async fn fetch_latest(&self) -> Result<Vec<NewsItem>, NewsApiError>;
}
