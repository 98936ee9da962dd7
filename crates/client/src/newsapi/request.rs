//! NewsAPI `everything` request parameters.

use serde::{Deserialize, Serialize};

/// Search terms for AI coverage, combined with OR.
pub const KEYWORDS: &[&str] =
    &["AI", "人工知能", "生成AI", "ChatGPT", "Claude", "Gemini", "Anthropic", "OpenAI", "Stability AI"];

pub use ainews_core::config::MAX_PAGE_SIZE;

/// Query parameters for `GET /everything`.
///
/// Based on https://newsapi.org/docs/endpoints/everything
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EverythingRequest {
    /// Keywords or phrases, supports `OR`.
    pub q: String,

    /// ISO 639-1 language code.
    pub language: String,

    /// Result ordering.
    pub sort_by: SortBy,

    /// Number of results (1-50 here, one page only).
    pub page_size: u8,
}

/// Result ordering accepted by the provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevancy,
    Popularity,
    PublishedAt,
}

impl EverythingRequest {
    /// Newest-first English AI news, one page of at most `page_size`.
    pub fn ai_news(page_size: u8) -> Self {
        Self {
            q: KEYWORDS.join(" OR "),
            language: "en".to_string(),
            sort_by: SortBy::PublishedAt,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for EverythingRequest {
    fn default() -> Self {
        Self::ai_news(MAX_PAGE_SIZE)
    }
}
