//! Call sheet constants and validation.

use crate::error::CoreError;
use crate::time::validate_hhmm;

/// Valid call sheet statuses, in board-column order.
pub const CALL_SHEET_STATUSES: &[&str] = &["draft", "published", "archived"];

/// Maximum length of a call sheet name.
const MAX_NAME_LEN: usize = 200;

/// Maximum length of the free-text description.
const MAX_DESCRIPTION_LEN: usize = 4000;

/// Maximum number of rows in any nested sub-list (crew, talent, contacts).
pub const MAX_SUB_RECORDS: usize = 500;

/// Validate a call sheet status value.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if CALL_SHEET_STATUSES.contains(&status) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Invalid call sheet status '{status}', expected one of: {}",
        CALL_SHEET_STATUSES.join(", ")
    )))
}

/// Validate a call sheet name.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Call sheet name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Call sheet name must not exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate the optional description.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description must not exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a `HH:MM` call time.
pub fn validate_call_time(value: &str) -> Result<(), CoreError> {
    validate_hhmm("call_time", value)
}

/// Validate a nested sub-list length (crew calls, talent calls, contacts).
pub fn validate_sub_record_count(kind: &str, len: usize) -> Result<(), CoreError> {
    if len > MAX_SUB_RECORDS {
        return Err(CoreError::Validation(format!(
            "Too many {kind} entries: {len} exceeds the maximum of {MAX_SUB_RECORDS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_pass() {
        for s in CALL_SHEET_STATUSES {
            assert!(validate_status(s).is_ok());
        }
    }

    #[test]
    fn unknown_status_is_rejected_with_the_allowed_list() {
        let err = validate_status("live").unwrap_err();
        assert!(err.to_string().contains("draft, published, archived"));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("  ").is_err());
        assert!(validate_name("Main Stage Day 1").is_ok());
    }

    #[test]
    fn oversized_name_is_rejected() {
        assert!(validate_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn sub_record_count_is_bounded() {
        assert!(validate_sub_record_count("crew call", 500).is_ok());
        assert!(validate_sub_record_count("crew call", 501).is_err());
    }
}
