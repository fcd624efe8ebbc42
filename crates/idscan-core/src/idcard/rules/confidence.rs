//! Per-field confidence scoring from recognized blocks.

use super::RULES;
use crate::models::record::{FieldConfidence, NEUTRAL_CONFIDENCE};
use crate::ocr::RecognizedBlock;

/// Language confidence assumed for blocks that carry none.
///
/// A tunable default rather than a derived value.
pub const DEFAULT_LANGUAGE_CONFIDENCE: f32 = 0.85;

/// Score each field from the blocks related to it, using
/// [`DEFAULT_LANGUAGE_CONFIDENCE`] for blocks without metadata.
pub fn score_confidence(blocks: &[RecognizedBlock]) -> FieldConfidence {
    score_confidence_with_default(blocks, DEFAULT_LANGUAGE_CONFIDENCE)
}

/// Score each field as the rounded mean confidence (0 - 100) of the blocks
/// related to it. A block may count towards several fields; a field with no
/// related block scores [`NEUTRAL_CONFIDENCE`].
///
/// Zero, negative and non-finite confidences count as missing, and a scored
/// field never drops below 1: a score of 0 marks a failed recognition.
pub fn score_confidence_with_default(blocks: &[RecognizedBlock], default: f32) -> FieldConfidence {
    let default = Some(default)
        .filter(|c| c.is_finite() && *c > 0.0)
        .unwrap_or(DEFAULT_LANGUAGE_CONFIDENCE);
    let mut totals = [(0.0f64, 0usize); 3];

    for block in blocks {
        let base = f64::from(
            block
                .language_confidence
                .filter(|c| c.is_finite() && *c > 0.0)
                .unwrap_or(default)
                .clamp(0.0, 1.0),
        ) * 100.0;

        for (total, rule) in totals.iter_mut().zip(RULES) {
            if rule.is_related(&block.text) {
                total.0 += base;
                total.1 += 1;
            }
        }
    }

    let [name, id_number, date_of_birth] = totals.map(|(sum, count)| {
        if count == 0 {
            NEUTRAL_CONFIDENCE
        } else {
            (sum / count as f64).round().clamp(1.0, 100.0) as u8
        }
    });

    FieldConfidence {
        name,
        id_number,
        date_of_birth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_blocks_is_neutral() {
        assert_eq!(score_confidence(&[]), FieldConfidence::neutral());
    }

    #[test]
    fn test_default_language_confidence() {
        let blocks = vec![RecognizedBlock::new("Name: John Smith")];
        let scores = score_confidence(&blocks);

        assert_eq!(scores.name, 85);
        assert_eq!(scores.id_number, 50);
        assert_eq!(scores.date_of_birth, 50);
    }

    #[test]
    fn test_mean_per_category() {
        let blocks = vec![
            RecognizedBlock::new("Jane Doe").with_language_confidence(0.9),
            RecognizedBlock::new("Name").with_language_confidence(0.7),
            RecognizedBlock::new("ID Number: AB12345").with_language_confidence(0.95),
            RecognizedBlock::new("DOB 01/02/1990").with_language_confidence(0.6),
        ];

        let scores = score_confidence(&blocks);

        assert_eq!(scores.name, 80);
        assert_eq!(scores.id_number, 95);
        assert_eq!(scores.date_of_birth, 60);
    }

    #[test]
    fn test_block_counts_towards_several_fields() {
        let blocks = vec![RecognizedBlock::new("Name ID 01/02/1990").with_language_confidence(0.66)];
        let scores = score_confidence(&blocks);

        assert_eq!(scores, FieldConfidence { name: 66, id_number: 66, date_of_birth: 66 });
    }

    #[test]
    fn test_out_of_range_confidence() {
        let blocks = vec![
            RecognizedBlock::new("X1234567").with_language_confidence(1.7),
            RecognizedBlock::new("Jane Doe").with_language_confidence(-0.2),
        ];
        let scores = score_confidence(&blocks);

        assert_eq!(scores.id_number, 100);
        assert_eq!(scores.name, 85);
    }

    #[test]
    fn test_zero_confidence_counts_as_missing() {
        let blocks = vec![
            RecognizedBlock::new("Name: John Smith").with_language_confidence(0.0),
            RecognizedBlock::new("X1234567").with_language_confidence(f32::NAN),
        ];
        let scores = score_confidence(&blocks);

        assert_eq!(scores.name, 85);
        assert_eq!(scores.id_number, 85);
        assert_eq!(scores.date_of_birth, 50);
    }

    #[test]
    fn test_scored_field_never_reaches_zero() {
        let blocks = vec![RecognizedBlock::new("X1234567").with_language_confidence(0.001)];
        assert_eq!(score_confidence(&blocks).id_number, 1);

        let blocks = vec![RecognizedBlock::new("X1234567")];
        assert_eq!(score_confidence_with_default(&blocks, 0.0).id_number, 85);
    }

    #[test]
    fn test_configured_default() {
        let blocks = vec![RecognizedBlock::new("X1234567")];
        assert_eq!(score_confidence_with_default(&blocks, 0.5).id_number, 50);
        assert_eq!(score_confidence_with_default(&blocks, 0.72).id_number, 72);
    }
}
