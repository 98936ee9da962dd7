//! NewsAPI client.
//!
//! Fetches one page of AI news from the NewsAPI `everything` endpoint and
//! normalizes it into [`NewsItem`]s.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://newsapi.org/v2/everything`
//! - **Authentication**: API key in the `Authorization` header.
//! - **Query**: fixed keyword list joined with `OR`, English, newest first,
//!   one page of at most 50 results.
//! - **Single attempt**: one request per call with a bounded timeout; no
//!   retries. Callers decide what to do on failure.
//! - **Normalization**: duplicate and URL-less articles are dropped within
//!   the response; missing fields get placeholder values.

pub mod error;
pub mod request;
pub mod response;

pub use error::NewsApiError;
pub use request::{EverythingRequest, KEYWORDS, SortBy};
pub use response::{NewsApiResponse, RawArticle, RawSource};

use ainews_core::{AppConfig, NewsItem};
use async_trait::async_trait;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::source::NewsSource;

/// NewsAPI client configuration.
#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    /// API key; `None` means the client is not configured.
    pub api_key: Option<String>,
    /// Base URL (default: https://newsapi.org/v2).
    pub base_url: String,
    /// Request timeout (default: 15s).
    pub timeout: Duration,
    /// User-agent string (default: ai-news/0.x).
    pub user_agent: String,
    /// Articles per request (default: 50).
    pub page_size: u8,
}

impl Default for NewsApiConfig {
    /// Same values as `AppConfig::default()`, with no API key.
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for NewsApiConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_key: config.require_newsapi_key().ok().map(str::to_string),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            page_size: config.page_size,
        }
    }
}

/// NewsAPI client.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    config: NewsApiConfig,
}

impl NewsApiClient {
    /// Create a new client with the given configuration.
    ///
    /// A missing API key is not an error here; it is reported by each
    /// fetch so the caller can fall back to cached data.
    pub fn new(config: NewsApiConfig) -> Result<Self, NewsApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NewsApiError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Fetch the latest page of AI news.
    ///
    /// Issues exactly one request. Returns the normalized, deduplicated
    /// items in provider order.
    pub async fn fetch_latest(&self) -> Result<Vec<NewsItem>, NewsApiError> {
        let api_key = self.api_key().ok_or(NewsApiError::MissingApiKey)?;
        let req = EverythingRequest::ai_news(self.config.page_size);

        let start = Instant::now();
        let url = format!("{}/everything", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(page_size = req.page_size, "requesting NewsAPI everything");

        let http_response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, api_key)
            .header(header::ACCEPT, "application/json")
            .query(&req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("NewsAPI response status: {}", status);

        if !status.is_success() {
            let message = http_response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<response::ErrorBody>(&body).ok())
                .and_then(|body| body.message);
            return Err(NewsApiError::HttpError { status: status.as_u16(), message });
        }

        let bytes = http_response.bytes().await?;
        let api_response: NewsApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| NewsApiError::Parse(e.to_string()))?;

        if api_response.is_error() {
            return Err(NewsApiError::Api {
                code: api_response.code.unwrap_or_else(|| "unknown".to_string()),
                message: api_response.message.unwrap_or_default(),
            });
        }

        let received = api_response.articles.len();
        let items = api_response.into_items(chrono::Utc::now());

        tracing::debug!(
            "fetch completed in {:?}, {} articles, {} after dedup",
            start.elapsed(),
            received,
            items.len()
        );

        Ok(items)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_latest(&self) -> Result<Vec<NewsItem>, NewsApiError> {
        NewsApiClient::fetch_latest(self).await
    }
}
