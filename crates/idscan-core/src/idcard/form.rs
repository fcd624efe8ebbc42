//! Review-and-save flow for an extracted record.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::config::ConfidenceThresholds;
use crate::models::record::{ConfidenceLevel, ExtractionResult, Field, ValidationErrors};

use super::rules::validate;

/// Holds an extraction result while a user reviews and corrects it.
///
/// The extracted result is never modified; edits go to a separate copy that
/// is validated on save.
#[derive(Debug, Clone)]
pub struct CaptureForm {
    extracted: ExtractionResult,
    edited: ExtractionResult,
    errors: ValidationErrors,
    thresholds: ConfidenceThresholds,
}

impl CaptureForm {
    pub fn new(extracted: ExtractionResult) -> Self {
        Self {
            edited: extracted.clone(),
            extracted,
            errors: ValidationErrors::new(),
            thresholds: ConfidenceThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: ConfidenceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// The record as extracted, with its confidences.
    pub fn extracted(&self) -> &ExtractionResult {
        &self.extracted
    }

    /// The record with the user's edits applied.
    pub fn edited(&self) -> &ExtractionResult {
        &self.edited
    }

    /// Errors from the last failed save, minus fields edited since.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Replace one field's value and drop its pending error.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.edited.set(field, value);
        if self.errors.remove(field).is_some() {
            debug!("Cleared validation error for {}", field);
        }
    }

    /// Confidence label for a field of the extracted record.
    pub fn confidence_level(&self, field: Field) -> ConfidenceLevel {
        ConfidenceLevel::classify(self.extracted.confidence.get(field), &self.thresholds)
    }

    /// Validate the edited record; on success return it and clear errors.
    pub fn save(&mut self) -> Result<ExtractionResult, ExtractionError> {
        let errors = validate(&self.edited);
        if errors.is_empty() {
            self.errors.clear();
            Ok(self.edited.clone())
        } else {
            self.errors = errors.clone();
            Err(ExtractionError::Invalid(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::FieldConfidence;

    fn extracted() -> ExtractionResult {
        ExtractionResult::new(
            "John Smith",
            "AB1",
            "02/30/2000",
            FieldConfidence { name: 93, id_number: 72, date_of_birth: 40 },
        )
    }

    #[test]
    fn test_save_reports_errors_then_succeeds_after_edits() {
        let mut form = CaptureForm::new(extracted());

        let err = form.save().unwrap_err();
        assert!(matches!(err, ExtractionError::Invalid(ref e) if e.len() == 2));
        assert!(form.errors().contains(Field::IdNumber));
        assert!(form.errors().contains(Field::DateOfBirth));

        form.update_field(Field::IdNumber, "AB12345");
        assert!(!form.errors().contains(Field::IdNumber));
        assert!(form.errors().contains(Field::DateOfBirth));

        form.update_field(Field::DateOfBirth, "02/28/2000");
        let saved = form.save().unwrap();

        assert_eq!(saved.id_number, "AB12345");
        assert_eq!(saved.date_of_birth, "02/28/2000");
        assert!(form.errors().is_empty());
        assert_eq!(form.extracted().id_number, "AB1");
    }

    #[test]
    fn test_confidence_levels() {
        let form = CaptureForm::new(extracted());

        assert_eq!(form.confidence_level(Field::Name), ConfidenceLevel::High);
        assert_eq!(form.confidence_level(Field::IdNumber), ConfidenceLevel::Medium);
        assert_eq!(form.confidence_level(Field::DateOfBirth), ConfidenceLevel::Low);

        let strict = CaptureForm::new(extracted())
            .with_thresholds(ConfidenceThresholds { high: 95, medium: 80 });
        assert_eq!(strict.confidence_level(Field::Name), ConfidenceLevel::Medium);
    }
}
