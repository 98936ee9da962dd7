//! Unified error types for ai-news.
//!
//! Upstream failures are recoverable through the cache; storage failures
//! never are.

use tokio_rusqlite::rusqlite;

/// Unified error types for the ai-news service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The news provider credential is not configured.
    #[error("NOT_CONFIGURED: {0}")]
    NotConfigured(String),

    /// The news provider failed or returned something unusable.
    #[error("UPSTREAM_FAILURE: {0}")]
    Upstream(String),

    /// Database operation failed.
    #[error("STORAGE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORAGE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Filesystem error while preparing the database location.
    #[error("STORAGE_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error comes from the storage layer.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Database(_) | Error::MigrationFailed(_) | Error::Io(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}
