//! Route definitions for the call sheets module.
//!
//! Mounted at `/call-sheets` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::call_sheets;
use crate::state::AppState;

/// Call sheet routes.
///
/// ```text
/// GET    /       -> list_call_sheets (?status, q, from, to, limit, offset)
/// POST   /       -> create_call_sheet
/// GET    /{id}   -> get_call_sheet
/// PATCH  /{id}   -> update_call_sheet
/// DELETE /{id}   -> delete_call_sheet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(call_sheets::list_call_sheets).post(call_sheets::create_call_sheet),
        )
        .route(
            "/{id}",
            get(call_sheets::get_call_sheet)
                .patch(call_sheets::update_call_sheet)
                .delete(call_sheets::delete_call_sheet),
        )
}
