//! Date of birth extraction and date normalization.

use chrono::NaiveDate;

use super::patterns::{DATE, DATE_NORMALIZED};
use super::{contains_any, FieldRule};
use crate::models::record::Field;

const LABELS: &[&str] = &["birth", "dob"];

/// Two-digit years above this are read as 19xx, the rest as 20xx.
///
/// Fixed rather than relative to the current date, so ages outside a roughly
/// hundred year window are misread.
pub const TWO_DIGIT_YEAR_PIVOT: u32 = 50;

/// Years below this are treated as unexpanded two-digit years, not dates.
const MIN_VALID_YEAR: i32 = 100;

/// Finds the date of birth after a `birth` / `dob` label or as the first bare
/// date in the text.
pub struct DateOfBirthRule;

impl FieldRule for DateOfBirthRule {
    fn field(&self) -> Field {
        Field::DateOfBirth
    }

    fn extract(&self, line: &str, next: Option<&str>) -> Option<String> {
        let found = if contains_any(line, LABELS) {
            DATE.find(line).or_else(|| next.and_then(|n| DATE.find(n)))
        } else {
            DATE.find(line)
        };

        found.map(|m| normalize_date(m.as_str()))
    }

    fn is_related(&self, text: &str) -> bool {
        contains_any(text, LABELS) || DATE.is_match(text)
    }
}

/// Normalize a `D/M/Y`-style date to `MM/DD/YYYY`.
///
/// Two-digit years are expanded around [`TWO_DIGIT_YEAR_PIVOT`]. A first part
/// above 12 cannot be a month, so the date is read day-first and swapped;
/// otherwise it is read month-first. Input that does not split into exactly
/// three parts on `/` or `-` is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split(['/', '-']).collect();
    let [first, second, year] = parts.as_slice() else {
        return raw.to_string();
    };

    let year = expand_year(year);
    let (month, day) = match leading_number(first) {
        Some(n) if n > 12 => (second, first),
        _ => (first, second),
    };

    format!("{:0>2}/{:0>2}/{}", month, day, year)
}

/// Check a `MM/DD/YYYY` string names a real calendar day.
pub fn is_valid_date(date: &str) -> bool {
    let Some(caps) = DATE_NORMALIZED.captures(date) else {
        return false;
    };

    let month: u32 = caps[1].parse().unwrap_or(0);
    let day: u32 = caps[2].parse().unwrap_or(0);
    let year: i32 = caps[3].parse().unwrap_or(0);

    year >= MIN_VALID_YEAR && NaiveDate::from_ymd_opt(year, month, day).is_some()
}

fn expand_year(year: &str) -> String {
    if year.chars().count() != 2 {
        return year.to_string();
    }

    match leading_number(year) {
        Some(n) if n > TWO_DIGIT_YEAR_PIVOT => format!("19{}", year),
        _ => format!("20{}", year),
    }
}

/// Parse the leading run of ASCII digits, ignoring leading whitespace.
fn leading_number(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
