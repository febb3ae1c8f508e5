//! Programming itinerary model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use ghx_core::filter::{FieldValue, Record};
use ghx_core::types::{RecordId, Timestamp};

/// A row from the `itineraries` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Itinerary {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub event_id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    /// One of `draft`, `confirmed`, `in_progress`, `completed`.
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub transport_mode: Option<String>,
    /// Optimistic-concurrency version; bumped on every update.
    pub version: i32,
    pub created_by: RecordId,
    pub updated_by: Option<RecordId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Itinerary {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "start_date" => Some(FieldValue::Date(self.start_date)),
            "location" => self.location.clone().map(FieldValue::Text),
            "dates" => Some(FieldValue::DateRange {
                start: self.start_date,
                end: self.end_date,
            }),
            _ => None,
        }
    }
}

/// DTO for creating a new itinerary.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItinerary {
    pub event_id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: Option<String>,
    pub transport_mode: Option<String>,
}

/// DTO for updating an itinerary. All fields optional except `version`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItinerary {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub transport_mode: Option<String>,
    pub version: i32,
}

/// Server-side list filter (built by the handler from query parameters).
#[derive(Debug, Clone, Default)]
pub struct ItineraryFilter {
    pub status: Option<String>,
    /// Case-insensitive substring match on name.
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Keep only itineraries whose [start_date, end_date] intersects this range.
    pub overlaps: Option<(NaiveDate, NaiveDate)>,
}
