//! Handlers for the programming itineraries module.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use ghx_core::error::CoreError;
use ghx_core::itineraries::{
    validate_date_range, validate_name, validate_status, validate_transport_mode,
};
use ghx_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use ghx_core::types::RecordId;
use ghx_db::models::itinerary::{CreateItinerary, ItineraryFilter, UpdateItinerary};
use ghx_db::repositories::ItineraryRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{publish_delete, publish_insert, publish_update};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Entity tag used in change events and error messages.
const ENTITY: &str = "itineraries";

/// Query parameters for listing itineraries.
///
/// Extends the common list shape with `overlaps_start`/`overlaps_end`,
/// which keep only itineraries whose date range intersects the given one.
#[derive(Debug, Deserialize)]
pub struct ItineraryListParams {
    pub status: Option<String>,
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub overlaps_start: Option<NaiveDate>,
    pub overlaps_end: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /itineraries?status=&q=&from=&to=&overlaps_start=&overlaps_end=&limit=&offset=
pub async fn list_itineraries(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ItineraryListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_status(status)?;
    }

    let overlaps = match (params.overlaps_start, params.overlaps_end) {
        (Some(start), Some(end)) => {
            validate_date_range(start, end)?;
            Some((start, end))
        }
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "overlaps_start and overlaps_end must be provided together".to_string(),
            ));
        }
    };

    let filter = ItineraryFilter {
        status: params.status,
        q: params.q,
        from: params.from,
        to: params.to,
        overlaps,
    };
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let (itineraries, total) =
        ItineraryRepo::list(&state.pool, auth.organization_id, &filter, limit, offset).await?;

    Ok(Json(ListResponse {
        data: itineraries,
        total,
    }))
}

/// GET /itineraries/{id}
pub async fn get_itinerary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let itinerary = ItineraryRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Itinerary", id }))?;

    Ok(Json(DataResponse { data: itinerary }))
}

/// POST /itineraries
pub async fn create_itinerary(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateItinerary>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_date_range(input.start_date, input.end_date)?;
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref mode) = input.transport_mode {
        validate_transport_mode(mode)?;
    }

    let itinerary = ItineraryRepo::create(&state.pool, auth.organization_id, auth.user_id, &input)
        .await?;

    publish_insert(&state, &auth, ENTITY, itinerary.id, &itinerary);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        itinerary_id = %itinerary.id,
        name = %itinerary.name,
        "Itinerary created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: itinerary })))
}

/// PATCH /itineraries/{id}
///
/// Partially update an itinerary. The payload carries the expected
/// `version`; a stale version is rejected with 409.
pub async fn update_itinerary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<UpdateItinerary>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref mode) = input.transport_mode {
        validate_transport_mode(mode)?;
    }
    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        validate_date_range(start, end)?;
    }

    let updated =
        ItineraryRepo::update(&state.pool, auth.organization_id, id, auth.user_id, &input)
            .await?;

    let itinerary = match updated {
        Some(itinerary) => itinerary,
        None => {
            return match ItineraryRepo::find_by_id(&state.pool, auth.organization_id, id).await? {
                Some(current) => Err(AppError::Core(CoreError::StaleVersion {
                    entity: "Itinerary",
                    provided: input.version,
                    current: current.version,
                })),
                None => Err(AppError::Core(CoreError::NotFound { entity: "Itinerary", id })),
            };
        }
    };

    publish_update(&state, &auth, ENTITY, itinerary.id, &itinerary);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        itinerary_id = %id,
        version = itinerary.version,
        "Itinerary updated"
    );

    Ok(Json(DataResponse { data: itinerary }))
}

/// DELETE /itineraries/{id}
pub async fn delete_itinerary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let existing = ItineraryRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Itinerary", id }))?;

    ItineraryRepo::delete(&state.pool, auth.organization_id, id).await?;

    publish_delete(&state, &auth, ENTITY, id, &existing);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        itinerary_id = %id,
        "Itinerary deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
