pub mod auth;
pub mod call_sheets;
pub mod health;
pub mod itineraries;
pub mod lineups;
pub mod overview;
pub mod purchase_orders;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                      WebSocket change feed (?token=)
///
/// /auth/login              login (public)
/// /auth/refresh            refresh (public)
/// /auth/logout             logout
///
/// /call-sheets             list, create
/// /call-sheets/{id}        get, patch, delete
/// /purchase-orders         list, create
/// /purchase-orders/{id}    get, patch, delete
/// /itineraries             list, create
/// /itineraries/{id}        get, patch, delete
/// /lineups                 list, create
/// /lineups/{id}            get, patch, delete
///
/// /overview                per-module aggregates
/// /activities              recent activity log
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/call-sheets", call_sheets::router())
        .nest("/purchase-orders", purchase_orders::router())
        .nest("/itineraries", itineraries::router())
        .nest("/lineups", lineups::router())
        .merge(overview::router())
        .route("/activities", get(handlers::activities::list_activities))
}
