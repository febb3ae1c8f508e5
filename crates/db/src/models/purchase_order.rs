//! Purchase order model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

use ghx_core::filter::{FieldValue, Record};
use ghx_core::types::{RecordId, Timestamp};

/// A row from the `purchase_orders` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct PurchaseOrder {
    pub id: RecordId,
    pub organization_id: RecordId,
    pub project_id: Option<RecordId>,
    /// Unique per organization.
    pub order_number: String,
    pub vendor: String,
    pub description: Option<String>,
    /// One of `pending`, `approved`, `ordered`, `delivered`, `cancelled`.
    pub status: String,
    pub total_amount: f64,
    /// ISO 4217 code, e.g. `USD`.
    pub currency: String,
    pub expected_delivery: Option<NaiveDate>,
    /// Optimistic-concurrency version; bumped on every update.
    pub version: i32,
    pub created_by: RecordId,
    pub updated_by: Option<RecordId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for PurchaseOrder {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "order_number" => Some(FieldValue::Text(self.order_number.clone())),
            "vendor" => Some(FieldValue::Text(self.vendor.clone())),
            "status" => Some(FieldValue::Text(self.status.clone())),
            "total_amount" => Some(FieldValue::Number(self.total_amount)),
            "expected_delivery" => self.expected_delivery.map(FieldValue::Date),
            _ => None,
        }
    }
}

/// DTO for creating a new purchase order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePurchaseOrder {
    pub project_id: Option<RecordId>,
    pub order_number: String,
    pub vendor: String,
    pub description: Option<String>,
    /// Defaults to `pending` if omitted.
    pub status: Option<String>,
    pub total_amount: f64,
    /// Defaults to `USD` if omitted.
    pub currency: Option<String>,
    pub expected_delivery: Option<NaiveDate>,
}

/// DTO for updating a purchase order. All fields optional except `version`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePurchaseOrder {
    pub vendor: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
    pub expected_delivery: Option<NaiveDate>,
    pub version: i32,
}

/// Server-side list filter (built by the handler from query parameters).
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderFilter {
    pub status: Option<String>,
    /// Case-insensitive substring match on vendor or order number.
    pub q: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
