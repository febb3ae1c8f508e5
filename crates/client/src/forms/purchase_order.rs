//! Purchase order drawer payload.

use chrono::NaiveDate;
use serde::Serialize;
use validator::{Validate, ValidationError};

use ghx_core::error::CoreError;
use ghx_core::types::RecordId;

/// Draft payload for the create/edit purchase order drawer.
///
/// Serializes to the JSON accepted by `POST /api/v1/purchase-orders`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PurchaseOrderForm {
    pub project_id: Option<RecordId>,
    #[validate(custom(function = "order_number_value"))]
    pub order_number: String,
    #[validate(length(min = 1, max = 200, message = "Vendor must be 1-200 characters"))]
    pub vendor: String,
    pub description: Option<String>,
    #[validate(custom(function = "status_value"))]
    pub status: String,
    #[validate(range(min = 0.0, message = "Amount must be non-negative"))]
    pub total_amount: f64,
    #[validate(custom(function = "currency_value"))]
    pub currency: String,
    pub expected_delivery: Option<NaiveDate>,
}

impl Default for PurchaseOrderForm {
    /// An empty draft for a create drawer.
    fn default() -> Self {
        Self {
            project_id: None,
            order_number: String::new(),
            vendor: String::new(),
            description: None,
            status: "pending".to_string(),
            total_amount: 0.0,
            currency: "USD".to_string(),
            expected_delivery: None,
        }
    }
}

fn rule_error(code: &'static str, err: CoreError) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(err.to_string().into());
    error
}

fn order_number_value(value: &str) -> Result<(), ValidationError> {
    ghx_core::procurement::validate_order_number(value)
        .map_err(|e| rule_error("order_number", e))
}

fn status_value(value: &str) -> Result<(), ValidationError> {
    ghx_core::procurement::validate_status(value).map_err(|e| rule_error("status", e))
}

fn currency_value(value: &str) -> Result<(), ValidationError> {
    ghx_core::procurement::validate_currency(value).map_err(|e| rule_error("currency", e))
}
