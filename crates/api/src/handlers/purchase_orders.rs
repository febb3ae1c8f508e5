//! Handlers for the procurement (purchase orders) module.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use ghx_core::error::CoreError;
use ghx_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use ghx_core::procurement::{
    validate_amount, validate_currency, validate_order_number, validate_status, validate_vendor,
};
use ghx_core::types::RecordId;
use ghx_db::models::purchase_order::{
    CreatePurchaseOrder, PurchaseOrderFilter, UpdatePurchaseOrder,
};
use ghx_db::repositories::PurchaseOrderRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{publish_delete, publish_insert, publish_update};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Entity tag used in change events and error messages.
const ENTITY: &str = "purchase_orders";

/// GET /purchase-orders?status=&q=&from=&to=&limit=&offset=
///
/// List the organization's purchase orders. `q` matches vendor or order
/// number; `from`/`to` bound the expected delivery date.
pub async fn list_orders(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = params.status {
        validate_status(status)?;
    }

    let filter = PurchaseOrderFilter {
        status: params.status,
        q: params.q,
        from: params.from,
        to: params.to,
    };
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let (orders, total) =
        PurchaseOrderRepo::list(&state.pool, auth.organization_id, &filter, limit, offset)
            .await?;

    Ok(Json(ListResponse {
        data: orders,
        total,
    }))
}

/// GET /purchase-orders/{id}
pub async fn get_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let order = PurchaseOrderRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "PurchaseOrder", id }))?;

    Ok(Json(DataResponse { data: order }))
}

/// POST /purchase-orders
///
/// Create a new purchase order. Order numbers are unique per organization;
/// a duplicate is rejected with 409.
pub async fn create_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrder>,
) -> AppResult<impl IntoResponse> {
    validate_order_number(&input.order_number)?;
    validate_vendor(&input.vendor)?;
    validate_amount(input.total_amount)?;
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref currency) = input.currency {
        validate_currency(currency)?;
    }

    let order = PurchaseOrderRepo::create(&state.pool, auth.organization_id, auth.user_id, &input)
        .await?;

    publish_insert(&state, &auth, ENTITY, order.id, &order);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        order_id = %order.id,
        order_number = %order.order_number,
        "Purchase order created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// PATCH /purchase-orders/{id}
///
/// Partially update a purchase order. The payload carries the expected
/// `version`; a stale version is rejected with 409.
pub async fn update_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<UpdatePurchaseOrder>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref vendor) = input.vendor {
        validate_vendor(vendor)?;
    }
    if let Some(amount) = input.total_amount {
        validate_amount(amount)?;
    }
    if let Some(ref status) = input.status {
        validate_status(status)?;
    }
    if let Some(ref currency) = input.currency {
        validate_currency(currency)?;
    }

    let updated =
        PurchaseOrderRepo::update(&state.pool, auth.organization_id, id, auth.user_id, &input)
            .await?;

    let order = match updated {
        Some(order) => order,
        None => {
            return match PurchaseOrderRepo::find_by_id(&state.pool, auth.organization_id, id)
                .await?
            {
                Some(current) => Err(AppError::Core(CoreError::StaleVersion {
                    entity: "PurchaseOrder",
                    provided: input.version,
                    current: current.version,
                })),
                None => Err(AppError::Core(CoreError::NotFound { entity: "PurchaseOrder", id })),
            };
        }
    };

    publish_update(&state, &auth, ENTITY, order.id, &order);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        order_id = %id,
        version = order.version,
        "Purchase order updated"
    );

    Ok(Json(DataResponse { data: order }))
}

/// DELETE /purchase-orders/{id}
pub async fn delete_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let existing = PurchaseOrderRepo::find_by_id(&state.pool, auth.organization_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "PurchaseOrder", id }))?;

    PurchaseOrderRepo::delete(&state.pool, auth.organization_id, id).await?;

    publish_delete(&state, &auth, ENTITY, id, &existing);
    tracing::info!(
        user_id = %auth.user_id,
        org = %auth.organization_id,
        order_id = %id,
        "Purchase order deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
