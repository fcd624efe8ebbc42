//! Shared input handling for the process and batch commands.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use idscan_core::models::config::IdscanConfig;
use idscan_core::{
    create_engine_from_dir, load_image, CardExtractor, ExtractionResult, IdCardExtractor,
    PureOcrEngine, Recognition,
};

/// Image extensions handed to the OCR engine.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"];

/// How an input file is turned into a recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Raw recognized text, one block per line.
    Text,
    /// A serialized `Recognition` with block metadata.
    Recognition,
    /// An image to run through OCR.
    Image,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" => Some(InputKind::Text),
            "json" => Some(InputKind::Recognition),
            ext if IMAGE_EXTENSIONS.contains(&ext) => Some(InputKind::Image),
            _ => None,
        }
    }
}

/// Extractor plus a lazily loaded OCR engine, reused across files.
pub struct Pipeline<'a> {
    config: &'a IdscanConfig,
    model_dir: PathBuf,
    extractor: IdCardExtractor,
    engine: Option<PureOcrEngine>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a IdscanConfig, model_dir: Option<&Path>) -> Self {
        Self {
            config,
            model_dir: model_dir
                .map(Path::to_path_buf)
                .unwrap_or_else(|| config.models.model_dir.clone()),
            extractor: IdCardExtractor::from_config(&config.extraction),
            engine: None,
        }
    }

    /// Extract fields from one input file.
    pub fn extract_file(&mut self, path: &Path) -> anyhow::Result<ExtractionResult> {
        let Some(kind) = InputKind::from_path(path) else {
            anyhow::bail!("Unsupported file format: {}", path.display());
        };

        debug!("Reading {} as {:?}", path.display(), kind);

        match kind {
            InputKind::Text => {
                let text = fs::read_to_string(path)?;
                Ok(self.extractor.extract_from_text(&text))
            }
            InputKind::Recognition => {
                let content = fs::read_to_string(path)?;
                let recognition: Recognition = serde_json::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Invalid recognition file {}: {}", path.display(), e))?;
                Ok(self.extractor.extract(&recognition))
            }
            InputKind::Image => self.extract_image(path),
        }
    }

    fn extract_image(&mut self, path: &Path) -> anyhow::Result<ExtractionResult> {
        self.load_engine()?;
        let Some(engine) = self.engine.as_ref() else {
            anyhow::bail!("OCR engine not initialized");
        };

        // An unreadable image is a recognition failure, not a command failure
        let image = match load_image(path) {
            Ok(image) => image,
            Err(e) => {
                warn!("Could not read image {}: {}", path.display(), e);
                return Ok(ExtractionResult::failed());
            }
        };

        Ok(self.extractor.process(engine, &image))
    }

    fn load_engine(&mut self) -> anyhow::Result<()> {
        if self.engine.is_none() {
            let engine = create_engine_from_dir(&self.model_dir, self.config).map_err(|e| {
                anyhow::anyhow!(
                    "{}\n\nPlace {}, {} and {} in {} or pass --model-dir.",
                    e,
                    self.config.models.detection_model,
                    self.config.models.recognition_model,
                    self.config.models.dictionary,
                    self.model_dir.display()
                )
            })?;
            self.engine = Some(engine);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind() {
        assert_eq!(InputKind::from_path(Path::new("card.TXT")), Some(InputKind::Text));
        assert_eq!(InputKind::from_path(Path::new("scan.json")), Some(InputKind::Recognition));
        assert_eq!(InputKind::from_path(Path::new("front.jpeg")), Some(InputKind::Image));
        assert_eq!(InputKind::from_path(Path::new("card.pdf")), None);
        assert_eq!(InputKind::from_path(Path::new("card")), None);
    }
}
