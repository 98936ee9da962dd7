//! NewsAPI client error types.

use std::sync::Arc;

/// Errors from the NewsAPI client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NewsApiError {
    /// No API key configured.
    #[error("missing API key: NEWSAPI_KEY is not set")]
    MissingApiKey,

    /// Non-success HTTP status from the provider.
    #[error("HTTP error: {status}{}", detail(.message))]
    HttpError { status: u16, message: Option<String> },

    /// Provider answered 2xx but reported an error in the body.
    #[error("provider error {code}: {message}")]
    Api { code: String, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default()
}

impl NewsApiError {
    /// Whether the failure is a missing credential rather than a provider
    /// or transport problem.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, NewsApiError::MissingApiKey)
    }

    /// HTTP status reported by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            NewsApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NewsApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { NewsApiError::Timeout } else { NewsApiError::Network(Arc::new(err)) }
    }
}

impl From<NewsApiError> for ainews_core::Error {
    fn from(err: NewsApiError) -> Self {
        match err {
            NewsApiError::MissingApiKey => ainews_core::Error::NotConfigured(err.to_string()),
            other => ainews_core::Error::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NewsApiError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = NewsApiError::HttpError { status: 503, message: None };
        assert_eq!(err.to_string(), "HTTP error: 503");

        let err = NewsApiError::HttpError { status: 401, message: Some("Your API key is invalid".into()) };
        assert_eq!(err.to_string(), "HTTP error: 401 (Your API key is invalid)");
    }

    #[test]
    fn test_classification() {
        assert!(NewsApiError::MissingApiKey.is_not_configured());
        assert!(!NewsApiError::Timeout.is_not_configured());
        assert_eq!(NewsApiError::HttpError { status: 429, message: None }.status(), Some(429));
        assert_eq!(NewsApiError::Parse("eof".into()).status(), None);
    }

    #[test]
    fn test_into_core_error() {
        let core: ainews_core::Error = NewsApiError::MissingApiKey.into();
        assert!(matches!(core, ainews_core::Error::NotConfigured(_)));

        let core: ainews_core::Error = NewsApiError::HttpError { status: 500, message: None }.into();
        assert!(matches!(core, ainews_core::Error::Upstream(msg) if msg.contains("500")));
    }
}
