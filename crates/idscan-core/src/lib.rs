//! Core library for ID card OCR processing.
//!
//! This crate provides:
//! - a text recognition boundary, with a pure Rust PaddleOCR engine on native builds
//! - field extraction for name, ID number and date of birth
//! - per-field confidence scoring, date normalization and validation

pub mod error;
pub mod idcard;
pub mod models;
pub mod ocr;

pub use error::{ExtractionError, IdscanError, OcrError, Result};
pub use idcard::rules::{is_valid_date, normalize_date, score_confidence, validate};
pub use idcard::{extract_fields, CaptureForm, CardExtractor, IdCardExtractor};
pub use models::config::IdscanConfig;
pub use models::record::{
    ConfidenceLevel, ExtractedFields, ExtractionResult, Field, FieldConfidence, ValidationErrors,
};
pub use ocr::{load_image, Recognition, RecognizedBlock, TextRecognizer};

#[cfg(feature = "native")]
pub use ocr::{create_engine_from_dir, PureOcrEngine};
