//! Activity log handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use ghx_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use ghx_db::repositories::ActivityRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /activities?limit=&offset=
///
/// Recent activity for the caller's organization, newest first.
pub async fn list_activities(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let activities = ActivityRepo::list(&state.pool, auth.organization_id, limit, offset).await?;
    Ok(Json(DataResponse { data: activities }))
}
