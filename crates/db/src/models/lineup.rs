//! Lineup model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use ghx_core::filter::{FieldValue, Record};
use ghx_core::types::{RecordId, Timestamp};

/// A row from the `lineups` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Lineup {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub event_id: Option<RecordId>,
    pub name: String,
    pub performer: String,
    pub stage: Option<String>,
    /// One of `tentative`, `confirmed`, `cancelled`.
    pub status: String,
    pub performance_date: NaiveDate,
    /// `HH:MM`, 24-hour clock.
    pub set_start: Option<String>,
    /// `HH:MM`; may be before `set_start` for overnight sets.
    pub set_end: Option<String>,
    /// Optimistic-concurrency version; bumped on every update.
    pub version: i32,
    pub created_by: RecordId,
    pub updated_by: Option<RecordId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Lineup {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "performer" => Some(FieldValue::Text(self.performer.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "performance_date" => Some(FieldValue::Date(self.performance_date)),
            "stage" => self.stage.clone().map(FieldValue::Text),
            _ => None,
        }
    }
}

/// DTO for creating a new lineup entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLineup {
    pub event_id: Option<RecordId>,
    pub name: String,
    pub performer: String,
    pub stage: Option<String>,
    /// Defaults to `tentative` if omitted.
    pub status: Option<String>,
    pub performance_date: NaiveDate,
    pub set_start: Option<String>,
    pub set_end: Option<String>,
}

/// DTO for updating a lineup entry. All fields optional except `version`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLineup {
    pub name: Option<String>,
    pub performer: Option<String>,
    pub stage: Option<String>,
    pub status: Option<String>,
    pub performance_date: Option<NaiveDate>,
    pub set_start: Option<String>,
    pub set_end: Option<String>,
    pub version: i32,
}

/// Server-side list filter (built by the handler from query parameters).
#[derive(Debug, Clone, Default)]
pub struct LineupFilter {
    pub status: Option<String>,
    /// Case-insensitive substring match on name or performer.
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
