//! Activity log model.
//!
//! Activities are written best-effort by the event-bus subscriber; a failed
//! write is logged and dropped, never surfaced to the mutating request.

use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

use ghx_core::types::{RecordId, Timestamp};

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Activity {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub user_id: Option<RecordId>,
    /// Entity kind, e.g. `call_sheets`.
    pub entity: String,
    pub entity_id: RecordId,
    /// Action verb: `created`, `updated`, or `deleted`.
    pub action: String,
    pub detail: serde_json::Value,
    pub created_at: Timestamp,
}

/// Insert payload for a new activity row.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub organization_id: RecordId,
    pub user_id: Option<RecordId>,
    pub entity: String,
    pub entity_id: RecordId,
    pub action: String,
    pub detail: serde_json::Value,
}
