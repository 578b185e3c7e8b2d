//! Search route handler.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use partdesk_core::{SearchResponse, SortKey, assemble};

use crate::error::{AppError, Result};
use crate::search::dispatch;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search text; required in practice, an empty value yields the
    /// user-facing "empty query" outcome
    #[serde(default)]
    pub q: String,
    /// Requested quantity; non-positive, malformed, or absent values
    /// coerce to 1
    pub qty: Option<String>,
    /// Sort key; unknown values fall back to price
    #[serde(default)]
    pub sort: String,
}

/// Coerce the raw `qty` parameter to a usable quantity.
fn effective_qty(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|qty| u32::try_from(qty).ok())
        .filter(|qty| *qty > 0)
        .unwrap_or(1)
}

/// Search the catalog and allocate the requested quantity.
///
/// Returns the full payload shape on every path; expected user-facing
/// failures arrive as a populated `error` field with HTTP 200, repository
/// failures as HTTP 500 with a generic message.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let requested_qty = effective_qty(query.qty.as_deref());
    let sort = SortKey::parse(&query.sort);

    let offers = dispatch(state.offers(), state.semantic(), &query.q, sort)
        .await
        .map_err(|source| AppError::search(requested_qty, source))?;

    Ok(Json(assemble(offers, requested_qty)))
}

/// Create the search routes router.
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_qty_defaults_to_one() {
        assert_eq!(effective_qty(None), 1);
    }

    #[test]
    fn test_effective_qty_coerces_non_positive_to_one() {
        assert_eq!(effective_qty(Some("0")), 1);
        assert_eq!(effective_qty(Some("-5")), 1);
    }

    #[test]
    fn test_effective_qty_coerces_malformed_to_one() {
        assert_eq!(effective_qty(Some("")), 1);
        assert_eq!(effective_qty(Some("lots")), 1);
    }

    #[test]
    fn test_effective_qty_passes_positive_through() {
        assert_eq!(effective_qty(Some("1")), 1);
        assert_eq!(effective_qty(Some("250")), 250);
    }
}
