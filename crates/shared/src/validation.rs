//! Common validation utilities.

use validator::ValidationError;

/// Highest year level accepted for a student.
const MAX_YEAR_LEVEL: i32 = 10;

/// Validates that a string field is not empty or whitespace only.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a student's year level is within 1 to 10.
pub fn validate_year_level(year: i32) -> Result<(), ValidationError> {
    if (1..=MAX_YEAR_LEVEL).contains(&year) {
        Ok(())
    } else {
        let mut err = ValidationError::new("year_range");
        err.message = Some("Year must be between 1 and 10".into());
        Err(err)
    }
}

/// Validates a class join code as typed by a student (case-insensitive).
pub fn validate_join_code(code: &str) -> Result<(), ValidationError> {
    let normalized = crate::class_code::normalize_class_code(code);
    if crate::class_code::CLASS_CODE_REGEX.is_match(&normalized) {
        Ok(())
    } else {
        let mut err = ValidationError::new("class_code_format");
        err.message = Some("Class code must be 6 letters or digits".into());
        Err(err)
    }
}
