// ABOUTME: Field-level validation rules shared by the create and update paths.
// ABOUTME: Every check reports which field failed and which constraint it violated.

use thiserror::Error;

/// A field constraint violation. Carries the offending field name so the
/// caller can tell the user exactly what to fix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("gender must be M, F, or OTHER, got {value:?}")]
    InvalidGender { value: String },

    #[error("roll number {roll_no:?} is already taken")]
    DuplicateRollNo { roll_no: String },
}

/// Reject strings that are empty or whitespace-only.
pub fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Check an integer field against an inclusive range.
pub fn int_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(max),
        });
    }
    Ok(())
}

/// Check a float field against an inclusive range. NaN never passes.
pub fn float_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
