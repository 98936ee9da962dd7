//! Client code for ai-news.
//!
//! This crate provides the NewsAPI client and the curator that combines it
//! with the local store, shared by the server and CLI.

pub mod curator;
pub mod newsapi;
pub mod source;

pub use curator::{FetchOutcome, NewsCurator};
pub use newsapi::{NewsApiClient, NewsApiConfig, NewsApiError};
pub use source::NewsSource;
