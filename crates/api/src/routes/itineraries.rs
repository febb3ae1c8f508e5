//! Route definitions for the programming itineraries module.
//!
//! Mounted at `/itineraries` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::itineraries;
use crate::state::AppState;

/// Itinerary routes.
///
/// ```text
/// GET    /       -> list_itineraries (?status, q, from, to, overlaps_start, overlaps_end, limit, offset)
/// POST   /       -> create_itinerary
/// GET    /{id}   -> get_itinerary
/// PATCH  /{id}   -> update_itinerary
/// DELETE /{id}   -> delete_itinerary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(itineraries::list_itineraries).post(itineraries::create_itinerary),
        )
        .route(
            "/{id}",
            get(itineraries::get_itinerary)
                .patch(itineraries::update_itinerary)
                .delete(itineraries::delete_itinerary),
        )
}
