//! Line-scan parser turning recognized text into ID card fields.

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::models::config::ExtractionConfig;
use crate::models::record::{ExtractedFields, ExtractionResult};
use crate::ocr::{Recognition, TextRecognizer};

use super::rules::{score_confidence_with_default, DEFAULT_LANGUAGE_CONFIDENCE, RULES};
use super::CardExtractor;

/// Locate name, ID number and date of birth in raw recognized text.
///
/// Lines are trimmed and empty lines dropped; order is kept because a label
/// line's value may sit on the line after it. Each field takes the first
/// value found and is never overwritten by a later line.
pub fn extract_fields(raw_text: &str) -> ExtractedFields {
    let lines: Vec<&str> = raw_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines
        .iter()
        .enumerate()
        .fold(ExtractedFields::default(), |mut fields, (i, line)| {
            let next = lines.get(i + 1).copied();

            for rule in RULES {
                let slot = fields.slot_mut(rule.field());
                if slot.is_some() {
                    continue;
                }
                if let Some(value) = rule.extract(line, next) {
                    debug!(field = %rule.field(), line = i, "matched {:?}", value);
                    *slot = Some(value);
                }
            }

            fields
        })
}

/// Field extractor for ID card recognitions.
#[derive(Debug, Clone)]
pub struct IdCardExtractor {
    /// Confidence assumed for blocks without language metadata.
    default_language_confidence: f32,
}

impl IdCardExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            default_language_confidence: DEFAULT_LANGUAGE_CONFIDENCE,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_default_language_confidence(config.default_language_confidence)
    }

    /// Set the confidence assumed for blocks without language metadata.
    pub fn with_default_language_confidence(mut self, confidence: f32) -> Self {
        self.default_language_confidence = confidence;
        self
    }

    /// Recognize an image and extract its fields.
    ///
    /// Recognition errors are absorbed: the caller gets
    /// [`ExtractionResult::failed`], whose zero confidences mark that
    /// extraction never ran.
    pub fn process<R>(&self, recognizer: &R, image: &DynamicImage) -> ExtractionResult
    where
        R: TextRecognizer + ?Sized,
    {
        match recognizer.recognize(image) {
            Ok(recognition) => self.extract(&recognition),
            Err(e) => {
                warn!("Recognition failed, returning empty result: {}", e);
                ExtractionResult::failed()
            }
        }
    }
}

impl Default for IdCardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CardExtractor for IdCardExtractor {
    fn extract(&self, recognition: &Recognition) -> ExtractionResult {
        info!(
            "Extracting fields from {} characters in {} blocks",
            recognition.text.len(),
            recognition.blocks.len()
        );

        let fields = extract_fields(&recognition.text);
        let confidence =
            score_confidence_with_default(&recognition.blocks, self.default_language_confidence);

        if !fields.is_complete() {
            debug!("Incomplete extraction: {:?}", fields);
        }

        fields.into_result(confidence)
    }

    fn extract_from_text(&self, text: &str) -> ExtractionResult {
        self.extract(&Recognition::from_text(text))
    }
}
