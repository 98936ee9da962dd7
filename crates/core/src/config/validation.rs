//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest page NewsAPI serves in a single request.
pub const MAX_PAGE_SIZE: u8 = 50;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `page_size` is 0 or above 50
    /// - `cache_limit` is 0
    /// - `user_agent`, `base_url` or `bind_addr` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid {
                field: "page_size".into(),
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }

        if self.cache_limit == 0 {
            return Err(ConfigError::Invalid { field: "cache_limit".into(), reason: "must be greater than 0".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid { field: "base_url".into(), reason: "must not be empty".into() });
        }

        if self.bind_addr.is_empty() {
            return Err(ConfigError::Invalid { field: "bind_addr".into(), reason: "must not be empty".into() });
        }

        if self.newsapi_key.is_none() {
            tracing::warn!("newsapi_key is not set; news will be served from the local cache only");
        }

        Ok(())
    }
}
