//! Purchase order constants and validation.

use crate::error::CoreError;

/// Valid purchase order statuses, in board-column order.
pub const ORDER_STATUSES: &[&str] = &[
    "pending",
    "approved",
    "ordered",
    "delivered",
    "cancelled",
];

/// Maximum length of an order number.
const MAX_ORDER_NUMBER_LEN: usize = 64;

/// Maximum length of a vendor name.
const MAX_VENDOR_LEN: usize = 200;

/// Validate a purchase order status value.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if ORDER_STATUSES.contains(&status) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Invalid order status '{status}', expected one of: {}",
        ORDER_STATUSES.join(", ")
    )))
}

/// Validate an order number.
///
/// Rules:
/// - Must not be empty.
/// - Must not exceed `MAX_ORDER_NUMBER_LEN` characters.
/// - Must contain only alphanumeric, hyphen, or underscore characters.
pub fn validate_order_number(order_number: &str) -> Result<(), CoreError> {
    if order_number.is_empty() {
        return Err(CoreError::Validation(
            "Order number must not be empty".to_string(),
        ));
    }
    if order_number.len() > MAX_ORDER_NUMBER_LEN {
        return Err(CoreError::Validation(format!(
            "Order number must not exceed {MAX_ORDER_NUMBER_LEN} characters"
        )));
    }
    if !order_number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "Order number may only contain alphanumeric, hyphen, or underscore characters"
                .to_string(),
        ));
    }
    Ok(())
}

/// Validate a vendor name.
pub fn validate_vendor(vendor: &str) -> Result<(), CoreError> {
    if vendor.trim().is_empty() {
        return Err(CoreError::Validation(
            "Vendor must not be empty".to_string(),
        ));
    }
    if vendor.len() > MAX_VENDOR_LEN {
        return Err(CoreError::Validation(format!(
            "Vendor must not exceed {MAX_VENDOR_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a monetary amount: finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "Amount must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}

/// Validate an ISO 4217 currency code (three uppercase ASCII letters).
pub fn validate_currency(currency: &str) -> Result<(), CoreError> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Currency must be a three-letter uppercase code, got '{currency}'"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_charset_is_enforced() {
        assert!(validate_order_number("PO-2025-0042").is_ok());
        assert!(validate_order_number("PO 42").is_err());
        assert!(validate_order_number("").is_err());
    }

    #[test]
    fn amount_rejects_negative_and_non_finite() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(1499.99).is_ok());
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn currency_must_be_three_uppercase_letters() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("usd").is_err());
        assert!(validate_currency("US").is_err());
        assert!(validate_currency("DOLLARS").is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(validate_status("approved").is_ok());
        assert!(validate_status("paid").is_err());
    }
}
