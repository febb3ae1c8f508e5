//! Itinerary constants and validation.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Valid itinerary statuses, in board-column order.
pub const ITINERARY_STATUSES: &[&str] = &["draft", "confirmed", "in_progress", "completed"];

/// Recognised transport modes.
pub const TRANSPORT_MODES: &[&str] = &["bus", "van", "flight", "train", "ferry", "walk"];

/// Maximum length of an itinerary name.
const MAX_NAME_LEN: usize = 200;

/// Validate an itinerary status value.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if ITINERARY_STATUSES.contains(&status) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Invalid itinerary status '{status}', expected one of: {}",
        ITINERARY_STATUSES.join(", ")
    )))
}

/// Validate an itinerary name.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Itinerary name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Itinerary name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an optional transport mode.
pub fn validate_transport_mode(mode: &str) -> Result<(), CoreError> {
    if TRANSPORT_MODES.contains(&mode) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Invalid transport mode '{mode}', expected one of: {}",
        TRANSPORT_MODES.join(", ")
    )))
}

/// Validate that an itinerary's date range is well-formed (start <= end).
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if start > end {
        return Err(CoreError::Validation(format!(
            "Itinerary start date {start} is after end date {end}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_must_not_be_inverted() {
        let start: NaiveDate = "2025-06-10".parse().unwrap();
        let end: NaiveDate = "2025-06-12".parse().unwrap();
        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(end, start).is_err());
    }

    #[test]
    fn transport_mode_membership() {
        assert!(validate_transport_mode("bus").is_ok());
        assert!(validate_transport_mode("teleport").is_err());
    }
}
