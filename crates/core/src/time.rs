//! Wall-clock time-of-day validation.
//!
//! Call times and set times are stored as `HH:MM` strings (24-hour clock),
//! matching what crews actually write on a sheet.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// `HH:MM`, 24-hour clock, zero-padded.
fn hhmm_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid regex"))
}

/// Validate an `HH:MM` time-of-day string.
pub fn validate_hhmm(field: &str, value: &str) -> Result<(), CoreError> {
    if hhmm_pattern().is_match(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be a 24-hour HH:MM time, got '{value}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_padded_24_hour_times() {
        for t in ["00:00", "06:30", "18:45", "23:59"] {
            assert!(validate_hhmm("call_time", t).is_ok(), "{t} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_times() {
        for t in ["24:00", "7:30", "12:60", "noon", "12:3", ""] {
            assert!(validate_hhmm("call_time", t).is_err(), "{t} should be invalid");
        }
    }
}
