//! Route definitions for the lineups module.
//!
//! Mounted at `/lineups` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::lineups;
use crate::state::AppState;

/// Lineup routes.
///
/// ```text
/// GET    /       -> list_lineups (?status, q, from, to, limit, offset)
/// POST   /       -> create_lineup
/// GET    /{id}   -> get_lineup
/// PATCH  /{id}   -> update_lineup
/// DELETE /{id}   -> delete_lineup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lineups::list_lineups).post(lineups::create_lineup))
        .route(
            "/{id}",
            get(lineups::get_lineup)
                .patch(lineups::update_lineup)
                .delete(lineups::delete_lineup),
        )
}
