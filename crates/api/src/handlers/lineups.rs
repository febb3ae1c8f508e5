//! Handlers for the lineups module.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use ghx_core::error::CoreError;
use ghx_core::lineups::{validate_name, validate_performer, validate_set_time, validate_status};
use ghx_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use ghx_core::types::RecordId;
use ghx_db::models::lineup::{CreateLineup, LineupFilter, UpdateLineup};
use ghx_db::repositories::LineupRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{publish_delete, publish_insert, publish_update};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Entity tag used in change events and error messages.
const ENTITY: &str = "lineups";

/// GET /lineups?status=&q=&from=&to=&limit=&offset=
///
/// List the organization's lineup entries. `q` matches name or performer;
/// `from`/`to` bound the performance date.
pub async fn list_lineups(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_status(status)?;
    }

    let filter = LineupFilter {
        status: params.status,
        q: params.q,
        from: params.from,
        to: params.to,
    };
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let (lineups, total) =
        LineupRepo::list(&state.pool, auth.organization_id, &filter, limit, offset).await?;

    Ok(Json(ListResponse {
        data: lineups,
        total,
    }))
}

/// GET /lineups/{id}
pub async fn get_lineup(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let lineup = LineupRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lineup", id }))?;

    Ok(Json(DataResponse { data: lineup }))
}

/// POST /lineups
pub async fn create_lineup(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLineup>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_performer(&input.performer)?;
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref set_start) = input.set_start {
        validate_set_time("set_start", set_start)?;
    }
    if let Some(ref set_end) = input.set_end {
        validate_set_time("set_end", set_end)?;
    }

    let lineup = LineupRepo::create(&state.pool, auth.organization_id, auth.user_id, &input)
        .await?;

    publish_insert(&state, &auth, ENTITY, lineup.id, &lineup);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        lineup_id = %lineup.id,
        performer = %lineup.performer,
        "Lineup created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lineup })))
}

/// PATCH /lineups/{id}
///
/// Partially update a lineup entry. The payload carries the expected
/// `version`; a stale version is rejected with 409.
pub async fn update_lineup(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<UpdateLineup>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }
    if let Some(ref performer) = input.performer {
        validate_performer(performer)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref set_start) = input.set_start {
        validate_set_time("set_start", set_start)?;
    }
    if let Some(ref set_end) = input.set_end {
        validate_set_time("set_end", set_end)?;
    }

    let updated = LineupRepo::update(&state.pool, auth.organization_id, id, auth.user_id, &input)
        .await?;

    let lineup = match updated {
        Some(lineup) => lineup,
        None => {
            return match LineupRepo::find_by_id(&state.pool, auth.organization_id, id).await? {
                Some(current) => Err(AppError::Core(CoreError::StaleVersion {
                    entity: "Lineup",
                    provided: input.version,
                    current: current.version,
                })),
                None => Err(AppError::Core(CoreError::NotFound { entity: "Lineup", id })),
            };
        }
    };

    publish_update(&state, &auth, ENTITY, lineup.id, &lineup);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        lineup_id = %id,
        version = lineup.version,
        "Lineup updated"
    );

    Ok(Json(DataResponse { data: lineup }))
}

/// DELETE /lineups/{id}
pub async fn delete_lineup(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let existing = LineupRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lineup", id }))?;

    LineupRepo::delete(&state.pool, auth.organization_id, id).await?;

    publish_delete(&state, &auth, ENTITY, id, &existing);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        lineup_id = %id,
        "Lineup deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
