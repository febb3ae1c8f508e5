//! Lineup constants and validation.

use crate::error::CoreError;
use crate::time::validate_hhmm;

/// Valid lineup statuses, in board-column order.
pub const LINEUP_STATUSES: &[&str] = &["tentative", "confirmed", "cancelled"];

/// Maximum length of a lineup name or performer.
const MAX_NAME_LEN: usize = 200;

/// Validate a lineup status value.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if LINEUP_STATUSES.contains(&status) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Invalid lineup status '{status}', expected one of: {}",
        LINEUP_STATUSES.join(", ")
    )))
}

/// Validate a lineup name.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Lineup name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Lineup name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a performer name.
pub fn validate_performer(performer: &str) -> Result<(), CoreError> {
    if performer.trim().is_empty() {
        return Err(CoreError::Validation(
            "Performer must not be empty".to_string(),
        ));
    }
    if performer.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Performer must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a `HH:MM` set boundary. Overnight sets (end before start) are
/// allowed; only the format is checked.
pub fn validate_set_time(field: &str, value: &str) -> Result<(), CoreError> {
    validate_hhmm(field, value)
}
