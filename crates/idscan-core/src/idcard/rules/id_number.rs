//! Document identifier extraction.

use super::patterns::{ID_RUN, ID_RUN_UPPER, ID_STANDALONE};
use super::{contains_any, FieldRule};
use crate::models::record::Field;

const LABELS: &[&str] = &["id", "number"];

/// Finds the document number after an `id` / `number` label or as a bare
/// identifier line.
pub struct IdNumberRule;

impl IdNumberRule {
    /// Identifier run on a labelled line.
    ///
    /// Label words like "Number" or "Identity" are themselves 5+ letter runs.
    /// A run carrying a digit wins; otherwise the first run after the label's
    /// colon that is not a label word.
    fn inline_value(line: &str) -> Option<&str> {
        ID_RUN
            .find_iter(line)
            .map(|m| m.as_str())
            .find(|run| run.chars().any(|c| c.is_ascii_digit()))
            .or_else(|| {
                let (_, value) = line.split_once(':')?;
                ID_RUN
                    .find_iter(value)
                    .map(|m| m.as_str())
                    .find(|run| !contains_any(run, LABELS))
            })
    }
}

impl FieldRule for IdNumberRule {
    fn field(&self) -> Field {
        Field::IdNumber
    }

    fn extract(&self, line: &str, next: Option<&str>) -> Option<String> {
        if contains_any(line, LABELS) {
            return Self::inline_value(line)
                .or_else(|| next.and_then(|n| ID_RUN_UPPER.find(n)).map(|m| m.as_str()))
                .map(str::to_string);
        }

        ID_STANDALONE.is_match(line).then(|| line.to_string())
    }

    fn is_related(&self, text: &str) -> bool {
        contains_any(text, LABELS) || ID_STANDALONE.is_match(text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_label() {
        assert_eq!(
            IdNumberRule.extract("ID Number: AB12345", None),
            Some("AB12345".to_string())
        );
        assert_eq!(
            IdNumberRule.extract("id no. x-99812", None),
            Some("x-99812".to_string())
        );
    }

    #[test]
    fn test_inline_letters_only() {
        assert_eq!(
            IdNumberRule.extract("ID: ABCDEFG", Some("JOHNSON")),
            Some("ABCDEFG".to_string())
        );
        assert_eq!(
            IdNumberRule.extract("Passport Number: KXLMQRT", None),
            Some("KXLMQRT".to_string())
        );
        assert_eq!(
            IdNumberRule.extract("LICENSE NUMBER", Some("D1234-5678")),
            Some("D1234-5678".to_string())
        );
    }

    #[test]
    fn test_label_then_next_line() {
        assert_eq!(
            IdNumberRule.extract("Identity Number", Some("P 4410982K")),
            Some("4410982K".to_string())
        );
        assert_eq!(IdNumberRule.extract("ID Number", Some("see reverse")), None);
        assert_eq!(IdNumberRule.extract("ID Number", None), None);
    }

    #[test]
    fn test_standalone() {
        assert_eq!(IdNumberRule.extract("X1234567", None), Some("X1234567".to_string()));
        assert_eq!(IdNumberRule.extract("A1234", None), None);
        assert_eq!(IdNumberRule.extract("ABCDEFGHIJKLMNOP", None), None);
        assert_eq!(IdNumberRule.extract("x1234567", None), None);
    }

    #[test]
    fn test_related_blocks() {
        assert!(IdNumberRule.is_related("Card Number"));
        assert!(IdNumberRule.is_related("D-77120"));
        assert!(!IdNumberRule.is_related("Jane Doe"));
    }
}
