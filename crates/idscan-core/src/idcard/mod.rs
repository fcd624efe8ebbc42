//! ID card field extraction module.

mod form;
mod parser;
pub mod rules;

pub use form::CaptureForm;
pub use parser::{extract_fields, IdCardExtractor};

use crate::models::record::ExtractionResult;
use crate::ocr::Recognition;

/// Trait for ID card field extractors.
pub trait CardExtractor {
    /// Extract fields and confidences from a recognition.
    fn extract(&self, recognition: &Recognition) -> ExtractionResult;

    /// Extract fields from plain text, one block per line.
    fn extract_from_text(&self, text: &str) -> ExtractionResult;
}
