//! NewsAPI response types and normalization.

use std::collections::HashSet;

use ainews_core::news::{NewsItem, UNKNOWN_SOURCE, UNTITLED, parse_timestamp};
use ainews_core::truncate_summary;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Raw response from `GET /everything`.
///
/// Every field is optional so a sparse payload still decodes; defaults are
/// applied during normalization.
#[derive(Debug, Default, Deserialize)]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Individual article as sent by the provider.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Article source block.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Error body NewsAPI sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl NewsApiResponse {
    /// Whether the provider flagged the response as an error.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// Normalize articles into news items.
    ///
    /// Articles without a URL, or whose URL already appeared earlier in this
    /// response, are skipped. Provider order is preserved otherwise.
    pub fn into_items(self, now: DateTime<Utc>) -> Vec<NewsItem> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut items = Vec::with_capacity(self.articles.len());

        for article in self.articles {
            let Some(url) = non_empty(article.url.clone()) else {
                continue;
            };
            if !seen.insert(url.clone()) {
                tracing::debug!(url = %url, "skipping duplicate article");
                continue;
            }
            items.push(article.normalize(url, now));
        }

        items
    }
}

impl RawArticle {
    fn normalize(self, url: String, now: DateTime<Utc>) -> NewsItem {
        let title = non_empty(self.title).unwrap_or_else(|| UNTITLED.to_string());
        let source = non_empty(self.source.and_then(|s| s.name)).unwrap_or_else(|| UNKNOWN_SOURCE.to_string());
        let text = non_empty(self.description).or_else(|| non_empty(self.content));

        let published_at = match self.published_at.as_deref() {
            Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
                tracing::debug!(url = %url, published_at = raw, "unparsable publish time, using now");
                now
            }),
            None => now,
        };

        NewsItem {
            id: url.clone(),
            title,
            summary: truncate_summary(text.as_deref()),
            published_at,
            source,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FIXTURE_JSON: &str = r#"{
        "status": "ok",
        "totalResults": 4,
        "articles": [
            {
                "source": {"id": "the-verge", "name": "The Verge"},
                "author": "Reporter",
                "title": "OpenAI announces new model",
                "description": "  A new model was released today.  ",
                "url": "https://example.com/openai",
                "urlToImage": "https://example.com/openai.png",
                "publishedAt": "2024-03-15T10:00:00Z",
                "content": "Full content"
            },
            {
                "source": {"id": null, "name": "Wire"},
                "title": "Anthropic ships Claude update",
                "description": null,
                "url": "https://example.com/claude",
                "publishedAt": "2024-03-15T09:00:00+09:00",
                "content": "Content used as summary"
            },
            {
                "source": {"id": null, "name": "Copycat"},
                "title": "Duplicate",
                "url": "https://example.com/openai",
                "publishedAt": "2024-03-16T10:00:00Z"
            },
            {
                "source": {"id": null, "name": "No Link"},
                "title": "Missing url",
                "url": null
            }
        ]
    }"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_deserialize_response() {
        let response: NewsApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        assert_eq!(response.status.as_deref(), Some("ok"));
        assert_eq!(response.total_results, Some(4));
        assert_eq!(response.articles.len(), 4);
        assert!(!response.is_error());
    }

    #[test]
    fn test_normalize_dedups_and_skips_missing_url() {
        let response: NewsApiResponse = serde_json::from_str(FIXTURE_JSON).unwrap();
        let items = response.into_items(now());

        assert_eq!(items.len(), 2);
        let first = &items[0];
        assert_eq!(first.id, "https://example.com/openai");
        assert_eq!(first.url, first.id);
        assert_eq!(first.title, "OpenAI announces new model");
        assert_eq!(first.source, "The Verge");
        assert_eq!(first.summary, "A new model was released today.");
        assert_eq!(first.published_at, Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap());

        let second = &items[1];
        assert_eq!(second.id, "https://example.com/claude");
        assert_eq!(second.summary, "Content used as summary");
        assert_eq!(second.published_at, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let json = r#"{"articles": [
            {"title": "First", "url": "https://example.com/same"},
            {"title": "Second", "url": "https://example.com/same"}
        ]}"#;
        let items = serde_json::from_str::<NewsApiResponse>(json).unwrap().into_items(now());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "First");
    }

    #[test]
    fn test_defaults_for_sparse_article() {
        let json = r#"{"articles": [{"url": "https://example.com/bare", "title": "", "publishedAt": "not a date"}]}"#;
        let items = serde_json::from_str::<NewsApiResponse>(json).unwrap().into_items(now());

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title, UNTITLED);
        assert_eq!(item.source, UNKNOWN_SOURCE);
        assert_eq!(item.summary, "");
        assert_eq!(item.published_at, now());
    }

    #[test]
    fn test_long_description_truncated() {
        let json = format!(r#"{{"articles": [{{"url": "https://example.com/long", "description": "{}"}}]}}"#, "z".repeat(500));
        let items = serde_json::from_str::<NewsApiResponse>(&json).unwrap().into_items(now());
        assert_eq!(items[0].summary.chars().count(), 200);
        assert!(items[0].summary.ends_with('…'));
    }

    #[test]
    fn test_empty_and_missing_articles() {
        let items = serde_json::from_str::<NewsApiResponse>(r#"{"status": "ok", "articles": []}"#)
            .unwrap()
            .into_items(now());
        assert!(items.is_empty());

        let items = serde_json::from_str::<NewsApiResponse>(r#"{"status": "ok"}"#).unwrap().into_items(now());
        assert!(items.is_empty());
    }

    #[test]
    fn test_error_status_in_body() {
        let json = r#"{"status": "error", "code": "rateLimited", "message": "Too many requests"}"#;
        let response: NewsApiResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_error());
        assert_eq!(response.code.as_deref(), Some("rateLimited"));
    }
}
