//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (AINEWS_*)
//! 2. TOML config file (if AINEWS_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The unprefixed `NEWSAPI_KEY` and `NEWS_DB_PATH` variables are honoured
//! below the prefixed ones so existing deployments keep working.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::{ConfigError, MAX_PAGE_SIZE};

/// Rows served on cache fallback unless configured otherwise.
pub const DEFAULT_CACHE_LIMIT: usize = 50;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (AINEWS_*)
/// 2. Legacy variables (NEWSAPI_KEY, NEWS_DB_PATH)
/// 3. TOML config file (if AINEWS_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// NewsAPI key.
    ///
    /// Set via AINEWS_NEWSAPI_KEY. When absent the service runs from its
    /// cache only.
    #[serde(default)]
    pub newsapi_key: Option<String>,

    /// Path to the SQLite news database.
    ///
    /// Set via AINEWS_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// NewsAPI base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via AINEWS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via AINEWS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Articles requested per fetch (1-50).
    #[serde(default = "default_page_size")]
    pub page_size: u8,

    /// Rows served when falling back to the cache.
    #[serde(default = "default_cache_limit")]
    pub cache_limit: usize,

    /// Address the HTTP server binds to.
    ///
    /// Set via AINEWS_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Whether the server runs one fetch at startup.
    #[serde(default = "default_true")]
    pub prime_on_startup: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./db/news.db")
}

fn default_base_url() -> String {
    "https://newsapi.org/v2".into()
}

fn default_user_agent() -> String {
    "ai-news/0.1".into()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_page_size() -> u8 {
    MAX_PAGE_SIZE
}

fn default_cache_limit() -> usize {
    DEFAULT_CACHE_LIMIT
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".into()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            newsapi_key: None,
            db_path: default_db_path(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            page_size: default_page_size(),
            cache_limit: default_cache_limit(),
            bind_addr: default_bind_addr(),
            prime_on_startup: true,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("AINEWS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment
            .merge(Env::raw().only(&["NEWSAPI_KEY"]).map(|_| "newsapi_key".into()))
            .merge(Env::raw().only(&["NEWS_DB_PATH"]).map(|_| "db_path".into()))
            .merge(
                Env::prefixed("AINEWS_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
    }

    /// Return the NewsAPI key, treating an empty value as absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_newsapi_key(&self) -> Result<&str, ConfigError> {
        self.newsapi_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "newsapi_key".into(),
                hint: "Set AINEWS_NEWSAPI_KEY or NEWSAPI_KEY environment variable".into(),
            })
    }
}
