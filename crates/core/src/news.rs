//! News item types shared by the client, store and server.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Title used when the provider omits one.
pub const UNTITLED: &str = "Untitled";

/// Source name used when the provider omits one.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A single normalized article.
///
/// `id` is the article URL and doubles as the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub url: String,
}

/// A set of items together with the time they were served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsBatch {
    pub items: Vec<NewsItem>,
    pub fetched_at: DateTime<Utc>,
}

impl NewsBatch {
    pub fn new(items: Vec<NewsItem>, fetched_at: DateTime<Utc>) -> Self {
        Self { items, fetched_at }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Render a timestamp in the fixed form used for storage.
///
/// Microsecond precision with a `Z` suffix keeps every value the same width,
/// so text ordering matches chronological ordering.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
