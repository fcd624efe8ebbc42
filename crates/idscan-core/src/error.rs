//! Error types for the idscan-core library.

use thiserror::Error;

use crate::models::record::ValidationErrors;

/// Main error type for the idscan library.
#[derive(Error, Debug)]
pub enum IdscanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image loading error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a text recognizer.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to ID card field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The edited record did not pass validation.
    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),

    /// A field key that is not one of `name`, `idNumber`, `dateOfBirth`.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Result type for the idscan library.
pub type Result<T> = std::result::Result<T, IdscanError>;
