//! Configuration structures for the idscan pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{IdscanError, Result};

/// Main configuration for the idscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Confidence display thresholds.
    pub confidence: ConfidenceThresholds,

    /// Model configuration.
    pub models: ModelConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            keep_unk: false,
            max_image_size: 2048,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Confidence (0.0 - 1.0) assumed for blocks without language metadata.
    pub default_language_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_language_confidence: crate::idcard::rules::DEFAULT_LANGUAGE_CONFIDENCE,
        }
    }
}

/// Score thresholds for the High / Medium / Low confidence labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    /// Minimum score labelled High.
    pub high: u8,

    /// Minimum score labelled Medium.
    pub medium: u8,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self { high: 90, medium: 70 }
    }
}

/// Model file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl IdscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IdscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| IdscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IdscanConfig =
            serde_json::from_str(r#"{ "confidence": { "high": 85 } }"#).unwrap();

        assert_eq!(config.confidence, ConfidenceThresholds { high: 85, medium: 70 });
        assert!((config.extraction.default_language_confidence - 0.85).abs() < f32::EPSILON);
        assert_eq!(config.models.detection_model, "det.onnx");
        assert!(!config.ocr.keep_unk);
    }

    #[test]
    fn test_model_path() {
        let config = IdscanConfig::default();
        assert_eq!(
            config.model_path(&config.models.recognition_model),
            PathBuf::from("models").join("latin_rec.onnx")
        );
    }
}
