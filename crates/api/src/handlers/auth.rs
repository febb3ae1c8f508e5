//! Handlers for the `/auth` resource (login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use ghx_core::error::CoreError;
use ghx_core::types::RecordId;
use ghx_db::models::user::User;
use ghx_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens;
/// the access token carries the user's organization id, making the tenant
/// implicit in every subsequent request.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;

    tracing::info!(user_id = %user.id, org = %user.organization_id, "User logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// session is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_valid_by_hash(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "User for this session no longer exists".into(),
            ))
        })?;

    // Rotate: revoke the presented token before issuing a new pair.
    SessionRepo::delete_by_hash(&state.pool, &hash).await?;

    let response = create_auth_response(&state, &user).await?;

    tracing::info!(user_id = %user.id, "Session refreshed");
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke the presented refresh token. Always answers 204; logging out an
/// already-dead session is not an error.
pub async fn logout(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let hash = hash_refresh_token(&input.refresh_token);
    let revoked = SessionRepo::delete_by_hash(&state.pool, &hash).await?;

    tracing::info!(revoked, "Logout");
    Ok(StatusCode::NO_CONTENT)
}

/// Generate a token pair and persist the refresh session for a user.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let config = &state.config.jwt;

    let access_token =
        generate_access_token(user.id, user.organization_id, &user.role, config)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh_token = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(config.refresh_token_expiry_days);
    SessionRepo::create(
        &state.pool,
        user.id,
        &hash_refresh_token(&refresh_token),
        expires_at,
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: config.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            organization_id: user.organization_id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.clone(),
        },
    })
}
