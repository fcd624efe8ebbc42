//! WASM bindings for ID card field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Text recognition happens on the JavaScript side; the recognized text and
//! blocks are handed over here for structuring.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use idscan_core::{
    CardExtractor, ConfidenceLevel, ExtractionResult, IdCardExtractor, Recognition,
    RecognizedBlock,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Plain objects instead of `Map`s so field-keyed results read naturally in JS.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Locate name, ID number and date of birth in recognized text.
///
/// Fields that were not found are absent from the returned object.
#[wasm_bindgen]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    to_js(&idscan_core::extract_fields(text))
}

/// Normalize a recognized date to MM/DD/YYYY where possible.
#[wasm_bindgen]
pub fn normalize_date(raw: &str) -> String {
    idscan_core::normalize_date(raw)
}

/// Check that a string is a real MM/DD/YYYY calendar date.
#[wasm_bindgen]
pub fn is_valid_date(date: &str) -> bool {
    idscan_core::is_valid_date(date)
}

/// Validate an extraction result; returns a field-to-message object,
/// empty when the record may be saved.
#[wasm_bindgen]
pub fn validate(result: JsValue) -> Result<JsValue, JsValue> {
    let result: ExtractionResult = from_js(result)?;
    to_js(&idscan_core::validate(&result))
}

/// Per-field confidence from an array of `{text, languageConfidence?}` blocks.
#[wasm_bindgen]
pub fn score_confidence(blocks: JsValue) -> Result<JsValue, JsValue> {
    let blocks: Vec<RecognizedBlock> = from_js(blocks)?;
    to_js(&idscan_core::score_confidence(&blocks))
}

/// Extract fields and confidences from a `{text, blocks}` recognition.
#[wasm_bindgen]
pub fn extract_from_recognition(recognition: JsValue) -> Result<JsValue, JsValue> {
    let recognition: Recognition = from_js(recognition)?;
    to_js(&IdCardExtractor::new().extract(&recognition))
}

/// The result to show when text recognition failed.
#[wasm_bindgen]
pub fn failed_result() -> Result<JsValue, JsValue> {
    to_js(&ExtractionResult::failed())
}

/// "High", "Medium" or "Low" for a 0-100 confidence score.
#[wasm_bindgen]
pub fn confidence_label(score: u8) -> String {
    ConfidenceLevel::from_score(score).label().to_string()
}

/// Recognition assembled block by block from browser-side OCR output.
#[wasm_bindgen]
pub struct RecognitionJs {
    blocks: Vec<RecognizedBlock>,
    text: String,
}

#[wasm_bindgen]
impl RecognitionJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            text: String::new(),
        }
    }

    /// Add a recognized block. Pass `undefined` when the engine reports no
    /// language confidence.
    #[wasm_bindgen]
    pub fn add_block(&mut self, text: &str, language_confidence: Option<f32>) {
        let block = RecognizedBlock::new(text);
        self.blocks.push(match language_confidence {
            Some(confidence) => block.with_language_confidence(confidence),
            None => block,
        });
    }

    /// Set the full text.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the full text, falling back to the blocks joined by newlines.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.recognition().text
    }

    /// Extract fields and confidences from this recognition.
    #[wasm_bindgen]
    pub fn extract(&self) -> Result<JsValue, JsValue> {
        to_js(&IdCardExtractor::new().extract(&self.recognition()))
    }
}

impl RecognitionJs {
    fn recognition(&self) -> Recognition {
        if self.text.is_empty() {
            Recognition::from_blocks(self.blocks.clone())
        } else {
            Recognition::new(self.text.clone(), self.blocks.clone())
        }
    }
}

impl Default for RecognitionJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("13/05/1990"), "05/13/1990");
        assert_eq!(normalize_date("5-3-90"), "05/03/1990");
        assert!(is_valid_date("05/13/1990"));
        assert!(!is_valid_date("02/30/2000"));
    }

    #[wasm_bindgen_test]
    fn test_confidence_label() {
        assert_eq!(confidence_label(95), "High");
        assert_eq!(confidence_label(70), "Medium");
        assert_eq!(confidence_label(69), "Low");
    }

    #[wasm_bindgen_test]
    fn test_recognition_builder() {
        let mut recognition = RecognitionJs::new();
        recognition.add_block("Name: John Smith", Some(0.9));
        recognition.add_block("ID Number: AB12345", None);

        assert_eq!(recognition.get_text(), "Name: John Smith\nID Number: AB12345");

        let result: ExtractionResult =
            serde_wasm_bindgen::from_value(recognition.extract().unwrap()).unwrap();
        assert_eq!(result.name, "John Smith");
        assert_eq!(result.id_number, "AB12345");
        assert_eq!(result.date_of_birth, "");
    }

    #[wasm_bindgen_test]
    fn test_failed_result_validates_as_invalid() {
        let errors = validate(failed_result().unwrap()).unwrap();
        let errors: std::collections::BTreeMap<String, String> =
            serde_wasm_bindgen::from_value(errors).unwrap();

        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("dateOfBirth"));
    }
}
