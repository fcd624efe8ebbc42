//! Extraction record types shared by the extractor and its callers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

use super::config::ConfidenceThresholds;

/// Confidence reported for a field when no recognized block backed it.
pub const NEUTRAL_CONFIDENCE: u8 = 50;

/// One of the three structured attributes read from an ID card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    IdNumber,
    DateOfBirth,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Name, Field::IdNumber, Field::DateOfBirth];

    /// Wire key used by the presentation layer.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::IdNumber => "idNumber",
            Field::DateOfBirth => "dateOfBirth",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::IdNumber => "ID Number",
            Field::DateOfBirth => "Date of Birth",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| ExtractionError::UnknownField(s.to_string()))
    }
}

/// Per-field confidence scores (0 - 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfidence {
    pub name: u8,
    pub id_number: u8,
    pub date_of_birth: u8,
}

impl FieldConfidence {
    /// Scores used when extraction ran but nothing backed any field.
    pub fn neutral() -> Self {
        Self {
            name: NEUTRAL_CONFIDENCE,
            id_number: NEUTRAL_CONFIDENCE,
            date_of_birth: NEUTRAL_CONFIDENCE,
        }
    }

    /// Scores used when extraction did not run at all.
    pub fn zero() -> Self {
        Self {
            name: 0,
            id_number: 0,
            date_of_birth: 0,
        }
    }

    pub fn get(&self, field: Field) -> u8 {
        match field {
            Field::Name => self.name,
            Field::IdNumber => self.id_number,
            Field::DateOfBirth => self.date_of_birth,
        }
    }
}

impl Default for FieldConfidence {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Structured data read from an ID card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Holder name.
    #[serde(default)]
    pub name: String,

    /// Document identifier.
    #[serde(default)]
    pub id_number: String,

    /// Date of birth as `MM/DD/YYYY`, or empty.
    #[serde(default)]
    pub date_of_birth: String,

    /// Confidence per field.
    #[serde(default)]
    pub confidence: FieldConfidence,
}

impl ExtractionResult {
    /// Build a result from field values and their confidence.
    pub fn new(
        name: impl Into<String>,
        id_number: impl Into<String>,
        date_of_birth: impl Into<String>,
        confidence: FieldConfidence,
    ) -> Self {
        Self {
            name: name.into(),
            id_number: id_number.into(),
            date_of_birth: date_of_birth.into(),
            confidence,
        }
    }

    /// The result reported when text recognition failed: every field empty
    /// and every confidence zero.
    pub fn failed() -> Self {
        Self::new("", "", "", FieldConfidence::zero())
    }

    /// Whether this is the recognition-failure result.
    pub fn is_failed(&self) -> bool {
        *self == Self::failed()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::IdNumber => &self.id_number,
            Field::DateOfBirth => &self.date_of_birth,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::IdNumber => self.id_number = value,
            Field::DateOfBirth => self.date_of_birth = value,
        }
    }

    /// Copy of this result with one field replaced.
    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

/// Fields located by a single scan over recognized text; unset fields were
/// not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl ExtractedFields {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::IdNumber => self.id_number.as_deref(),
            Field::DateOfBirth => self.date_of_birth.as_deref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::IdNumber => &mut self.id_number,
            Field::DateOfBirth => &mut self.date_of_birth,
        }
    }

    /// True once every field has been located.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_some())
    }

    /// Fill unset fields with empty strings.
    pub fn into_result(self, confidence: FieldConfidence) -> ExtractionResult {
        ExtractionResult {
            name: self.name.unwrap_or_default(),
            id_number: self.id_number.unwrap_or_default(),
            date_of_birth: self.date_of_birth.unwrap_or_default(),
            confidence,
        }
    }
}

/// Per-field validation messages. Empty means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Coarse confidence bucket shown next to each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Classify a score against the given thresholds.
    pub fn classify(score: u8, thresholds: &ConfidenceThresholds) -> Self {
        if score >= thresholds.high {
            ConfidenceLevel::High
        } else if score >= thresholds.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Classify a score against the default thresholds (90 / 70).
    pub fn from_score(score: u8) -> Self {
        Self::classify(score, &ConfidenceThresholds::default())
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
        assert!("dob".parse::<Field>().is_err());
    }

    #[test]
    fn test_failed_result() {
        let result = ExtractionResult::failed();
        assert!(result.is_failed());
        assert_eq!(result.confidence, FieldConfidence::zero());
        assert_eq!(result.name, "");
    }

    #[test]
    fn test_result_wire_shape() {
        let result = ExtractionResult::new("John Smith", "AB12345", "05/20/1990", FieldConfidence::neutral());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "John Smith",
                "idNumber": "AB12345",
                "dateOfBirth": "05/20/1990",
                "confidence": { "name": 50, "idNumber": 50, "dateOfBirth": 50 }
            })
        );
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let original = ExtractionResult::new("Jane Doe", "X12345", "", FieldConfidence::neutral());
        let edited = original.clone().with_field(Field::DateOfBirth, "01/02/1980");

        assert_eq!(original.date_of_birth, "");
        assert_eq!(edited.get(Field::DateOfBirth), "01/02/1980");
        assert_eq!(edited.confidence, original.confidence);
    }

    #[test]
    fn test_validation_errors_serialize_by_key() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::DateOfBirth, "bad date");
        errors.insert(Field::Name, "too short");

        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"name":"too short","dateOfBirth":"bad date"}"#
        );
        assert_eq!(errors.to_string(), "name: too short; dateOfBirth: bad date");
    }

    #[test]
    fn test_confidence_level() {
        assert_eq!(ConfidenceLevel::from_score(95), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(90), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(70), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(69), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0).label(), "Low");
    }
}
