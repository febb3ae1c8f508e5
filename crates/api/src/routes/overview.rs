//! Route definitions for the analytics overview.
//!
//! Merged into `api_routes()` at the top level.

use axum::routing::get;
use axum::Router;

use crate::handlers::overview;
use crate::state::AppState;

/// Overview routes.
///
/// ```text
/// GET /overview  -> get_overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/overview", get(overview::get_overview))
}
