//! Core types and shared functionality for ai-news.
//!
//! This crate provides:
//! - News item model and timestamp helpers
//! - Summary truncation
//! - Store implementation with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod news;
pub mod store;
pub mod summary;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use news::{NewsBatch, NewsItem};
pub use store::NewsDb;
pub use summary::truncate_summary;
