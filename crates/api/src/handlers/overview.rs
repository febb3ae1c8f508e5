//! Analytics overview handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use ghx_db::repositories::OverviewRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /overview
///
/// Per-module aggregates for the caller's organization: counts by status,
/// procurement spend totals, and the upcoming call sheet count. All
/// statistics are computed in SQL.
pub async fn get_overview(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let summary = OverviewRepo::summary(&state.pool, auth.organization_id).await?;
    Ok(Json(DataResponse { data: summary }))
}
