//! Call sheet model, nested sub-records, and DTOs.
//!
//! Crew calls, talent calls, and emergency contacts are flat sub-records
//! stored as JSONB arrays on the sheet itself. Sub-record ids are generated
//! client-side (UUID v4) and the arrays are replaced wholesale on update,
//! never structurally diffed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use ts_rs::TS;

use ghx_core::filter::{FieldValue, Record};
use ghx_core::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Nested sub-records
// ---------------------------------------------------------------------------

/// A single crew call row on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrewCall {
    pub id: RecordId,
    pub department: String,
    pub position: String,
    pub name: String,
    /// `HH:MM`, 24-hour clock.
    pub call_time: String,
}

/// A single talent call row on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TalentCall {
    pub id: RecordId,
    pub name: String,
    pub role: String,
    /// `HH:MM`, 24-hour clock.
    pub call_time: String,
}

/// An emergency contact row on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmergencyContact {
    pub id: RecordId,
    pub name: String,
    pub phone: String,
    pub relation: Option<String>,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `call_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct CallSheet {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub project_id: Option<RecordId>,
    pub event_id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    /// One of `draft`, `published`, `archived`.
    pub status: String,
    pub call_date: NaiveDate,
    /// `HH:MM`, 24-hour clock.
    pub call_time: Option<String>,
    pub location: Option<String>,
    #[ts(as = "Vec<CrewCall>")]
    pub crew_calls: Json<Vec<CrewCall>>,
    #[ts(as = "Vec<TalentCall>")]
    pub talent_calls: Json<Vec<TalentCall>>,
    #[ts(as = "Vec<EmergencyContact>")]
    pub emergency_contacts: Json<Vec<EmergencyContact>>,
    /// Optimistic-concurrency version; bumped on every update.
    pub version: i32,
    pub created_by: RecordId,
    pub updated_by: Option<RecordId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for CallSheet {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "call_date" => Some(FieldValue::Date(self.call_date)),
            "location" => self.location.clone().map(FieldValue::Text),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new call sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCallSheet {
    pub project_id: Option<RecordId>,
    pub event_id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    pub call_date: NaiveDate,
    pub call_time: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub crew_calls: Vec<CrewCall>,
    #[serde(default)]
    pub talent_calls: Vec<TalentCall>,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

/// DTO for updating a call sheet. All fields optional except `version`,
/// the expected current version of the row (stale writes are rejected).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCallSheet {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub call_date: Option<NaiveDate>,
    pub call_time: Option<String>,
    pub location: Option<String>,
    pub crew_calls: Option<Vec<CrewCall>>,
    pub talent_calls: Option<Vec<TalentCall>>,
    pub emergency_contacts: Option<Vec<EmergencyContact>>,
    pub version: i32,
}

/// Server-side list filter (built by the handler from query parameters).
#[derive(Debug, Clone, Default)]
pub struct CallSheetFilter {
    pub status: Option<String>,
    /// Case-insensitive substring match on name.
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
