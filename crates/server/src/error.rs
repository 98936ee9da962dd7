//! Structured errors for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors returned to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No credential and nothing cached.
    #[error("{0}")]
    NotConfigured(String),

    /// Provider failed and nothing cached.
    #[error("{0}")]
    Upstream(String),

    /// The store could not be read or written.
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotConfigured(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotConfigured(_) => "NOT_CONFIGURED",
            ApiError::Upstream(_) => "UPSTREAM_FAILURE",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<ainews_core::Error> for ApiError {
    fn from(err: ainews_core::Error) -> Self {
        use ainews_core::Error;

        match err {
            Error::NotConfigured(msg) => ApiError::NotConfigured(msg),
            Error::Upstream(msg) => ApiError::Upstream(msg),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.code(), "message": self.to_string() }))).into_response()
    }
}
