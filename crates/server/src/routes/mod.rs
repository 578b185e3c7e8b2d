//! Route handlers for the search API.

pub mod search;

use axum::Router;

use crate::state::AppState;

/// Create the combined application router.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api", search::router())
}
