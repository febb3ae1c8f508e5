//! Organization model — the multi-tenancy boundary.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use ghx_core::types::{RecordId, Timestamp};

/// A row from the `organizations` table. Every other record in the system
/// is scoped by an organization id.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Organization {
    pub id: RecordId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new organization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
}
