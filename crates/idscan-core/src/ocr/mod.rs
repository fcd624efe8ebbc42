//! Text recognition boundary.
//!
//! The extractor never talks to an OCR engine directly. It consumes a
//! [`Recognition`] produced by any [`TextRecognizer`]; the native build ships
//! one backed by `pure-onnx-ocr`.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::{OcrError, Result};

/// One detected text region with its recognition metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedBlock {
    /// Recognized text content.
    pub text: String,

    /// Language confidence (0.0 - 1.0) reported by the recognizer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_confidence: Option<f32>,
}

impl RecognizedBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_confidence: None,
        }
    }

    pub fn with_language_confidence(mut self, confidence: f32) -> Self {
        self.language_confidence = Some(confidence);
        self
    }
}

/// Output of a text recognizer: the full text plus its blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    /// Full text, blocks separated by newlines.
    pub text: String,

    /// Recognized blocks in reading order.
    #[serde(default)]
    pub blocks: Vec<RecognizedBlock>,
}

impl Recognition {
    pub fn new(text: impl Into<String>, blocks: Vec<RecognizedBlock>) -> Self {
        Self {
            text: text.into(),
            blocks,
        }
    }

    /// Treat plain text as a recognition with one block per non-empty line
    /// and no language metadata.
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RecognizedBlock::new)
            .collect();

        Self::new(text, blocks)
    }

    /// Build the full text by joining block texts with newlines.
    pub fn from_blocks(blocks: Vec<RecognizedBlock>) -> Self {
        let text = blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self::new(text, blocks)
    }

    /// True when nothing was recognized.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.blocks.is_empty()
    }
}

/// A text recognition engine.
pub trait TextRecognizer {
    /// Recognize text in an image.
    fn recognize(&self, image: &DynamicImage) -> std::result::Result<Recognition, OcrError>;
}

/// Load an image from disk for recognition.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(image::open(path)?)
}

/// Create the native OCR engine from a model directory.
#[cfg(feature = "native")]
pub fn create_engine_from_dir(
    model_dir: &Path,
    config: &crate::models::config::IdscanConfig,
) -> Result<PureOcrEngine> {
    let required = [
        &config.models.detection_model,
        &config.models.recognition_model,
        &config.models.dictionary,
    ];

    if let Some(missing) = required.iter().map(|name| model_dir.join(name)).find(|p| !p.exists()) {
        return Err(OcrError::ModelLoad(format!("missing model file {}", missing.display())).into());
    }

    Ok(PureOcrEngine::from_dir(model_dir, &config.models, config.ocr.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_text_splits_blocks() {
        let recognition = Recognition::from_text("Name: John Smith\n\n  ID: AB12345  \n");

        assert_eq!(
            recognition.blocks,
            vec![
                RecognizedBlock::new("Name: John Smith"),
                RecognizedBlock::new("ID: AB12345"),
            ]
        );
        assert!(!recognition.is_empty());
    }

    #[test]
    fn test_from_blocks_joins_text() {
        let recognition = Recognition::from_blocks(vec![
            RecognizedBlock::new("Jane Doe").with_language_confidence(0.9),
            RecognizedBlock::new("X1234567"),
        ]);

        assert_eq!(recognition.text, "Jane Doe\nX1234567");
    }

    #[test]
    fn test_block_json_uses_camel_case() {
        let recognition: Recognition = serde_json::from_str(
            r#"{ "text": "DOB 01/02/1990", "blocks": [{ "text": "DOB 01/02/1990", "languageConfidence": 0.7 }] }"#,
        )
        .unwrap();

        assert_eq!(recognition.blocks[0].language_confidence, Some(0.7));
        assert_eq!(Recognition::default().is_empty(), true);
    }
}
