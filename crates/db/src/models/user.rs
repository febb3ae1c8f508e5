//! User model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use ghx_core::types::{RecordId, Timestamp};

/// A row from the `users` table.
///
/// The password hash never leaves the server: it is skipped on
/// serialization and absent from the exported TypeScript type.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct User {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub email: String,
    pub full_name: String,
    /// One of `admin`, `producer`, `viewer`.
    pub role: String,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub organization_id: RecordId,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub password: String,
}
