//! HTTP error mapping for the search API.
//!
//! Expected user-facing outcomes (empty query, nothing found) keep a
//! success status and carry their message in the payload's `error` field;
//! repository failures become a 500 with a generic message so internal
//! detail never reaches the response body. All error responses still use
//! the complete [`SearchResponse`] shape the client renderer expects.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use partdesk_core::SearchResponse;

use crate::search::SearchError;

/// A failed search request, carrying enough context to render the
/// full payload shape.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct AppError {
    requested_qty: u32,
    #[source]
    source: SearchError,
}

impl AppError {
    /// Wrap a dispatcher error together with the echoed request quantity.
    #[must_use]
    pub const fn search(requested_qty: u32, source: SearchError) -> Self {
        Self {
            requested_qty,
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.source {
            SearchError::EmptyQuery => (StatusCode::OK, "Empty query"),
            SearchError::NoResults => (StatusCode::OK, "Nothing found"),
            SearchError::Repository(err) => {
                tracing::error!(error = %err, "catalog query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Search query failed")
            }
        };

        let body = SearchResponse::error_response(self.requested_qty, message);
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
