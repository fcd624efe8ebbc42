//! Validation of extracted or user-edited records.

use super::dates::is_valid_date;
use crate::models::record::{ExtractionResult, Field, ValidationErrors};

const MIN_NAME_LEN: usize = 2;
const MIN_ID_NUMBER_LEN: usize = 5;

/// Check every field independently and collect a message per failing field.
pub fn validate(result: &ExtractionResult) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if result.name.chars().count() < MIN_NAME_LEN {
        errors.insert(
            Field::Name,
            "Name is required and must be at least 2 characters",
        );
    }

    if result.id_number.chars().count() < MIN_ID_NUMBER_LEN {
        errors.insert(
            Field::IdNumber,
            "ID Number is required and must be at least 5 characters",
        );
    }

    if !is_valid_date(&result.date_of_birth) {
        errors.insert(
            Field::DateOfBirth,
            "Valid date of birth is required (MM/DD/YYYY)",
        );
    }

    errors
}
