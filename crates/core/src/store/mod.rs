//! SQLite-backed store for fetched news items.
//!
//! This module provides durable keyed storage using SQLite with async
//! access via tokio-rusqlite. It supports:
//!
//! - Automatic schema migrations
//! - WAL mode for concurrent readers
//! - Batch upserts inside a single transaction
//! - Newest-first reads for cache fallback

pub mod connection;
pub mod migrations;
pub mod news;

pub use crate::Error;

pub use connection::NewsDb;
