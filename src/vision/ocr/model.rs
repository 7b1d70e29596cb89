// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR pipeline: detection, crop, recognition

use anyhow::Context;
use image::ImageReader;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::detection::{DetectionParams, OcrDetectionModel};
use super::engine::{EngineError, OcrEngine, OcrEngineConfig, PredictResult};
use super::preprocessing::{crop_region, preprocess_for_detection, preprocess_for_recognition};
use super::recognition::OcrRecognitionModel;

pub const DETECTION_MODEL_FILE: &str = "det_model.onnx";
pub const RECOGNITION_MODEL_FILE: &str = "rec_model.onnx";
pub const DICTIONARY_FILE: &str = "ppocr_keys_v1.txt";

/// PaddleOCR engine combining text detection and recognition
///
/// Runs on CPU through ONNX Runtime. Orientation classification and
/// unwarping are not part of this pipeline.
#[derive(Debug, Clone)]
pub struct PaddleOcrEngine {
    detection: OcrDetectionModel,
    recognition: OcrRecognitionModel,
}

impl PaddleOcrEngine {
    /// Load both models from `config.model_dir`
    pub fn new(config: &OcrEngineConfig) -> Result<Self, EngineError> {
        config.ensure_supported()?;
        Self::load(config).map_err(|e| EngineError::Model(format!("{:#}", e)))
    }

    fn load(config: &OcrEngineConfig) -> anyhow::Result<Self> {
        let dir = &config.model_dir;
        info!("Loading PaddleOCR models from {}", dir.display());

        let params = DetectionParams {
            thresh: config.text_det_thresh,
            box_thresh: config.text_det_box_thresh,
            unclip_ratio: config.text_det_unclip_ratio,
        };

        let detection = OcrDetectionModel::new(dir.join(DETECTION_MODEL_FILE), params)
            .context("Failed to load detection model")?;
        let recognition = OcrRecognitionModel::new(
            dir.join(RECOGNITION_MODEL_FILE),
            dir.join(DICTIONARY_FILE),
        )
        .context("Failed to load recognition model")?;

        info!(
            "PaddleOCR ready (unclip_ratio={}, det_thresh={}, box_thresh={})",
            params.unclip_ratio, params.thresh, params.box_thresh
        );

        Ok(Self {
            detection,
            recognition,
        })
    }

    fn run(&self, input: &Path) -> Result<PredictResult, EngineError> {
        let start = Instant::now();

        let image = ImageReader::open(input)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| EngineError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| EngineError::Decode(e.to_string()))?;

        let (det_input, info) = preprocess_for_detection(&image);
        let boxes = self
            .detection
            .detect(&det_input, &info)
            .map_err(|e| EngineError::Model(format!("{:#}", e)))?;

        let mut result = PredictResult::empty(input);
        for text_box in boxes {
            let crop = crop_region(&image, text_box.bbox);
            let rec_input = preprocess_for_recognition(&crop);
            let recognized = self
                .recognition
                .recognize(&rec_input)
                .map_err(|e| EngineError::Model(format!("{:#}", e)))?;

            if recognized.is_empty() {
                debug!("Dropping empty recognition at {:?}", text_box.bbox);
                continue;
            }

            result.rec_texts.push(recognized.text);
            result.rec_scores.push(recognized.confidence);
            result.rec_boxes.push(text_box.bbox);
            result.rec_polys.push(text_box.polygon());
        }

        info!(
            "OCR complete: {} regions in {}ms",
            result.len(),
            start.elapsed().as_millis()
        );

        Ok(result)
    }
}

impl OcrEngine for PaddleOcrEngine {
    fn name(&self) -> &'static str {
        "paddleocr"
    }

    fn predict(&self, input: &Path) -> Result<Vec<PredictResult>, EngineError> {
        if !input.exists() {
            return Err(EngineError::InputNotFound(input.to_path_buf()));
        }
        Ok(vec![self.run(input)?])
    }
}
