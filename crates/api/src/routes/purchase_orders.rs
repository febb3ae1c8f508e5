//! Route definitions for the procurement module.
//!
//! Mounted at `/purchase-orders` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::purchase_orders;
use crate::state::AppState;

/// Purchase order routes.
///
/// ```text
/// GET    /       -> list_orders (?status, q, from, to, limit, offset)
/// POST   /       -> create_order
/// GET    /{id}   -> get_order
/// PATCH  /{id}   -> update_order
/// DELETE /{id}   -> delete_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(purchase_orders::list_orders).post(purchase_orders::create_order),
        )
        .route(
            "/{id}",
            get(purchase_orders::get_order)
                .patch(purchase_orders::update_order)
                .delete(purchase_orders::delete_order),
        )
}
