//! Handlers for the call sheets module.
//!
//! Provides the standard collection surface (filtered list with total,
//! point read, create, versioned partial update, delete) over sheets and
//! their nested crew/talent/contact sub-lists.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use ghx_core::call_sheets::{
    validate_call_time, validate_description, validate_name, validate_status,
    validate_sub_record_count,
};
use ghx_core::error::CoreError;
use ghx_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use ghx_core::types::RecordId;
use ghx_db::models::call_sheet::{
    CallSheetFilter, CreateCallSheet, CrewCall, EmergencyContact, TalentCall, UpdateCallSheet,
};
use ghx_db::repositories::CallSheetRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{publish_delete, publish_insert, publish_update};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Entity tag used in change events and error messages.
const ENTITY: &str = "call_sheets";

/// Check the nested sub-lists of a create payload.
fn validate_sub_lists(
    crew: &[CrewCall],
    talent: &[TalentCall],
    contacts: &[EmergencyContact],
) -> Result<(), CoreError> {
    validate_sub_record_count("crew call", crew.len())?;
    validate_sub_record_count("talent call", talent.len())?;
    validate_sub_record_count("emergency contact", contacts.len())?;
    for entry in crew {
        validate_call_time(&entry.call_time)?;
    }
    for entry in talent {
        validate_call_time(&entry.call_time)?;
    }
    Ok(())
}

/// GET /call-sheets?status=&q=&from=&to=&limit=&offset=
///
/// List the organization's call sheets.
pub async fn list_call_sheets(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_status(status)?;
    }

    let filter = CallSheetFilter {
        status: params.status,
        q: params.q,
        from: params.from,
        to: params.to,
    };
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let (sheets, total) =
        CallSheetRepo::list(&state.pool, auth.organization_id, &filter, limit, offset).await?;

    Ok(Json(ListResponse {
        data: sheets,
        total,
    }))
}

/// GET /call-sheets/{id}
///
/// Get a single call sheet.
pub async fn get_call_sheet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let sheet = CallSheetRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CallSheet", id }))?;

    Ok(Json(DataResponse { data: sheet }))
}

/// POST /call-sheets
///
/// Create a new call sheet.
pub async fn create_call_sheet(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCallSheet>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref call_time) = input.call_time {
        validate_call_time(call_time)?;
    }
    validate_sub_lists(&input.crew_calls, &input.talent_calls, &input.emergency_contacts)?;

    let sheet = CallSheetRepo::create(&state.pool, auth.organization_id, auth.user_id, &input)
        .await?;

    publish_insert(&state, &auth, ENTITY, sheet.id, &sheet);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        call_sheet_id = %sheet.id,
        name = %sheet.name,
        "Call sheet created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: sheet })))
}

/// PATCH /call-sheets/{id}
///
/// Partially update a call sheet. The payload carries the expected
/// `version`; a stale version is rejected with 409.
pub async fn update_call_sheet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<UpdateCallSheet>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref call_time) = input.call_time {
        validate_call_time(call_time)?;
    }
    validate_sub_lists(
        input.crew_calls.as_deref().unwrap_or(&[]),
        input.talent_calls.as_deref().unwrap_or(&[]),
        input.emergency_contacts.as_deref().unwrap_or(&[]),
    )?;

    let updated =
        CallSheetRepo::update(&state.pool, auth.organization_id, id, auth.user_id, &input)
            .await?;

    let sheet = match updated {
        Some(sheet) => sheet,
        // No row matched (id, org, version): probe to tell a missing row
        // from a stale version.
        None => {
            return match CallSheetRepo::find_by_id(&state.pool, auth.organization_id, id).await? {
                Some(current) => Err(AppError::Core(CoreError::StaleVersion {
                    entity: "CallSheet",
                    provided: input.version,
                    current: current.version,
                })),
                None => Err(AppError::Core(CoreError::NotFound { entity: "CallSheet", id })),
            };
        }
    };

    publish_update(&state, &auth, ENTITY, sheet.id, &sheet);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        call_sheet_id = %id,
        version = sheet.version,
        "Call sheet updated"
    );

    Ok(Json(DataResponse { data: sheet }))
}

/// DELETE /call-sheets/{id}
///
/// Delete a call sheet.
pub async fn delete_call_sheet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let existing = CallSheetRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "CallSheet", id }))?;

    CallSheetRepo::delete(&state.pool, auth.organization_id, id).await?;

    publish_delete(&state, &auth, ENTITY, id, &existing);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        call_sheet_id = %id,
        "Call sheet deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
