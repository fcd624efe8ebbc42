//! Rule-based field extractors for ID card text.

pub mod confidence;
pub mod dates;
pub mod id_number;
pub mod name;
pub mod patterns;
pub mod validation;

pub use confidence::{score_confidence, score_confidence_with_default, DEFAULT_LANGUAGE_CONFIDENCE};
pub use dates::{is_valid_date, normalize_date, DateOfBirthRule};
pub use id_number::IdNumberRule;
pub use name::NameRule;
pub use validation::validate;

use crate::models::record::Field;

/// A line-oriented rule that locates one field.
///
/// Label lines either carry their value inline or have it on the line that
/// follows, so every rule sees the current line and its successor.
pub trait FieldRule {
    /// The field this rule fills.
    fn field(&self) -> Field;

    /// Read the field's value from `line`, looking at `next` when the line
    /// is only a label.
    fn extract(&self, line: &str, next: Option<&str>) -> Option<String>;

    /// Whether a recognized block belongs to this field's confidence category.
    fn is_related(&self, text: &str) -> bool;
}

/// The rules for every field, in [`Field::ALL`] order.
pub const RULES: [&dyn FieldRule; 3] = [&NameRule, &IdNumberRule, &DateOfBirthRule];

fn contains_any(line: &str, tokens: &[&str]) -> bool {
    let lower = line.to_lowercase();
    tokens.iter().any(|t| lower.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_follow_field_order() {
        let fields: Vec<Field> = RULES.iter().map(|r| r.field()).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }
}
