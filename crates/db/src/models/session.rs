//! Refresh-token session model.

use sqlx::FromRow;

use ghx_core::types::{RecordId, Timestamp};

/// A row from the `sessions` table.
///
/// Only the SHA-256 digest of the opaque refresh token is stored, so a
/// database leak does not compromise active sessions.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: RecordId,
    pub user_id: RecordId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
