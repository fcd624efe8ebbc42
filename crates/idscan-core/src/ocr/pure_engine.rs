//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{ModelConfig, OcrConfig};

use super::{Recognition, RecognizedBlock, TextRecognizer};

/// Rows closer than this many pixels are read as one line.
const ROW_HEIGHT: f32 = 20.0;

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

/// A recognized region before it is flattened into a block.
struct Region {
    /// Top-left corner of the axis-aligned bounding rectangle.
    origin: (f32, f32),
    text: String,
    confidence: f32,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(model_dir: &Path, models: &ModelConfig, config: OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&models.detection_model);
        let rec_path = model_dir.join(&models.recognition_model);
        let dict_path = model_dir.join(&models.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine, config })
    }

    fn scale_down(&self, image: &DynamicImage) -> Option<DynamicImage> {
        let (width, height) = image.dimensions();
        let max = self.config.max_image_size;
        if max == 0 || width.max(height) <= max {
            return None;
        }

        debug!("Scaling {}x{} image to fit {}px", width, height, max);
        Some(image.resize(max, max, FilterType::Triangle))
    }
}

impl TextRecognizer for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<Recognition, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!("empty image {}x{}", width, height)));
        }

        info!("Recognizing image: {}x{}", width, height);

        let scaled = self.scale_down(image);
        let image = scaled.as_ref().unwrap_or(image);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut regions: Vec<Region> = results
            .iter()
            .map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                Region {
                    origin: polygon_origin(&r.bounding_box),
                    text: text.trim().to_string(),
                    confidence: r.confidence,
                }
            })
            .filter(|r| !r.text.is_empty())
            .collect();

        sort_by_reading_order(&mut regions);

        let blocks = regions
            .into_iter()
            .map(|r| RecognizedBlock::new(r.text).with_language_confidence(r.confidence.clamp(0.0, 1.0)))
            .collect::<Vec<_>>();

        info!(
            "OCR complete: {} blocks in {}ms",
            blocks.len(),
            start.elapsed().as_millis()
        );

        Ok(Recognition::from_blocks(blocks))
    }
}

/// Top-to-bottom by row, then left-to-right.
fn sort_by_reading_order(regions: &mut [Region]) {
    regions.sort_by(|a, b| {
        let row_a = (a.origin.1 / ROW_HEIGHT) as i32;
        let row_b = (b.origin.1 / ROW_HEIGHT) as i32;
        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            a.origin
                .0
                .partial_cmp(&b.origin.0)
                .unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Minimum x and y over the first four exterior points of a polygon.
fn polygon_origin(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .take(4)
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), coord| {
            (x.min(coord.x as f32), y.min(coord.y as f32))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: f32, y: f32, text: &str) -> Region {
        Region {
            origin: (x, y),
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_reading_order() {
        let mut regions = vec![
            region(200.0, 45.0, "AB12345"),
            region(10.0, 5.0, "Name:"),
            region(10.0, 42.0, "ID Number:"),
            region(120.0, 8.0, "John Smith"),
        ];

        sort_by_reading_order(&mut regions);

        let texts: Vec<&str> = regions.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Name:", "John Smith", "ID Number:", "AB12345"]);
    }
}
