//! Fetch-and-cache orchestration.
//!
//! [`NewsCurator::get_news`] tries the upstream source once. Fresh items are
//! persisted and returned; if the source is unconfigured or failing, the most
//! recent stored items are served instead. Storage errors always propagate.

use std::sync::Arc;

use ainews_core::config::DEFAULT_CACHE_LIMIT;
use ainews_core::{Error, NewsBatch, NewsDb, NewsItem};
use chrono::Utc;

use crate::newsapi::NewsApiError;
use crate::source::NewsSource;

/// Classified result of one upstream attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The source answered with a batch of items.
    Fresh(Vec<NewsItem>),
    /// No credential is configured.
    NotConfigured(NewsApiError),
    /// The source failed (status, body, or transport).
    UpstreamFailure(NewsApiError),
}

impl From<Result<Vec<NewsItem>, NewsApiError>> for FetchOutcome {
    fn from(result: Result<Vec<NewsItem>, NewsApiError>) -> Self {
        match result {
            Ok(items) => FetchOutcome::Fresh(items),
            Err(err) if err.is_not_configured() => FetchOutcome::NotConfigured(err),
            Err(err) => FetchOutcome::UpstreamFailure(err),
        }
    }
}

/// Combines a news source with the local store.
#[derive(Clone)]
pub struct NewsCurator {
    source: Arc<dyn NewsSource>,
    db: NewsDb,
    cache_limit: usize,
}

impl NewsCurator {
    pub fn new(source: Arc<dyn NewsSource>, db: NewsDb) -> Self {
        Self { source, db, cache_limit: DEFAULT_CACHE_LIMIT }
    }

    /// Set how many stored items are served on fallback.
    pub fn with_cache_limit(mut self, cache_limit: usize) -> Self {
        self.cache_limit = cache_limit.max(1);
        self
    }

    /// Run one upstream attempt and classify the result.
    pub async fn attempt(&self) -> FetchOutcome {
        self.source.fetch_latest().await.into()
    }

    /// Serve fresh news, falling back to the store.
    ///
    /// # Errors
    ///
    /// - `Error::NotConfigured` when no credential is set and the store is empty
    /// - `Error::Upstream` when the source failed and the store is empty
    /// - storage errors from any step
    pub async fn get_news(&self) -> Result<NewsBatch, Error> {
        match self.attempt().await {
            FetchOutcome::Fresh(items) => self.persist(items).await,
            FetchOutcome::NotConfigured(err) => {
                tracing::warn!("news source not configured, serving cached news");
                self.from_cache(err).await
            }
            FetchOutcome::UpstreamFailure(err) => {
                tracing::warn!(error = %err, status = ?err.status(), "news source failed, serving cached news");
                self.from_cache(err).await
            }
        }
    }

    /// Fetch and persist without any cache fallback.
    ///
    /// Used for startup priming and one-shot command-line fetches.
    pub async fn refresh(&self) -> Result<NewsBatch, Error> {
        match self.attempt().await {
            FetchOutcome::Fresh(items) => self.persist(items).await,
            FetchOutcome::NotConfigured(err) | FetchOutcome::UpstreamFailure(err) => Err(err.into()),
        }
    }

    async fn persist(&self, items: Vec<NewsItem>) -> Result<NewsBatch, Error> {
        let fetched_at = Utc::now();
        let written = self.db.upsert(&items, fetched_at).await?;
        tracing::info!(items = written, "stored fresh news");
        Ok(NewsBatch::new(items, fetched_at))
    }

    async fn from_cache(&self, cause: NewsApiError) -> Result<NewsBatch, Error> {
        let cached = self.db.fetch_recent(self.cache_limit).await?;
        if cached.is_empty() {
            tracing::warn!(error = %cause, "cache is empty, nothing to serve");
            return Err(cause.into());
        }

        tracing::info!(items = cached.len(), "serving cached news");
        Ok(NewsBatch::new(cached, Utc::now()))
    }
}
