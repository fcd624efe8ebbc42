//! Holder name extraction.

use super::patterns::{NAME_INLINE, NAME_SHAPE};
use super::{contains_any, FieldRule};
use crate::models::record::Field;

/// Finds the holder name after a `name` label or as a bare capitalized line.
pub struct NameRule;

impl NameRule {
    /// Two leading capitalized words and 6 to 49 characters overall.
    pub fn looks_like_name(line: &str) -> bool {
        let len = line.chars().count();
        NAME_SHAPE.is_match(line) && (6..50).contains(&len)
    }
}

impl FieldRule for NameRule {
    fn field(&self) -> Field {
        Field::Name
    }

    fn extract(&self, line: &str, next: Option<&str>) -> Option<String> {
        if contains_any(line, &["name"]) {
            if let Some(caps) = NAME_INLINE.captures(line) {
                return Some(caps[1].trim().to_string());
            }
            return next.map(str::to_string);
        }

        Self::looks_like_name(line).then(|| line.to_string())
    }

    fn is_related(&self, text: &str) -> bool {
        contains_any(text, &["name"]) || Self::looks_like_name(text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_label() {
        assert_eq!(NameRule.extract("Name: John Smith", None), Some("John Smith".to_string()));
        assert_eq!(NameRule.extract("SURNAME  DOE", None), Some("DOE".to_string()));
    }

    #[test]
    fn test_label_then_next_line() {
        assert_eq!(NameRule.extract("Name:", Some("MARIA LOPEZ")), Some("MARIA LOPEZ".to_string()));
        assert_eq!(NameRule.extract("Full Name", None), None);
    }

    #[test]
    fn test_capitalized_line() {
        assert_eq!(NameRule.extract("Jane Doe", None), Some("Jane Doe".to_string()));
        assert_eq!(NameRule.extract("Al Bo", None), None);
        assert_eq!(NameRule.extract("JANE DOE", None), None);
        assert_eq!(NameRule.extract("jane doe", None), None);
    }

    #[test]
    fn test_length_bounds() {
        let long = format!("Jane Doe {}", "x".repeat(41));
        assert_eq!(long.len(), 50);
        assert_eq!(NameRule.extract(&long, None), None);
        assert!(NameRule::looks_like_name(&long[..49]));
    }

    #[test]
    fn test_related_blocks() {
        assert!(NameRule.is_related("NAME"));
        assert!(NameRule.is_related("Jane Doe"));
        assert!(!NameRule.is_related("AB12345"));
    }
}
