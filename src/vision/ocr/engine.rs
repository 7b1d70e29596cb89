// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR engine contract
//!
//! The engine turns an image on disk into one [`PredictResult`] per image:
//! recognized texts, their scores and their axis-aligned boxes as parallel,
//! index-aligned arrays. Everything downstream only depends on this trait,
//! so the PaddleOCR pipeline can be swapped for a stub in tests.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default directory for raw prediction dumps
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Errors raised by an OCR engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported engine option: {0}")]
    Unsupported(String),

    #[error("input image not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("failed to decode input image: {0}")]
    Decode(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("failed to write prediction: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize prediction: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Construction options for an OCR engine
#[derive(Debug, Clone, PartialEq)]
pub struct OcrEngineConfig {
    /// Directory holding det_model.onnx, rec_model.onnx and ppocr_keys_v1.txt
    pub model_dir: PathBuf,
    /// Whole-document orientation classification
    pub use_doc_orientation_classify: bool,
    /// Document unwarping
    pub use_doc_unwarping: bool,
    /// Per-line orientation classification
    pub use_textline_orientation: bool,
    /// Box expansion ratio applied after detection
    pub text_det_unclip_ratio: f32,
    /// Pixel threshold on the detection probability map
    pub text_det_thresh: f32,
    /// Minimum mean probability for a detected box to be kept
    pub text_det_box_thresh: f32,
}

impl Default for OcrEngineConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("./models/paddleocr-onnx"),
            use_doc_orientation_classify: false,
            use_doc_unwarping: false,
            use_textline_orientation: false,
            text_det_unclip_ratio: 1.5,
            text_det_thresh: 0.3,
            text_det_box_thresh: 0.6,
        }
    }
}

impl OcrEngineConfig {
    /// Reject stages the pipeline does not implement
    pub fn ensure_supported(&self) -> Result<(), EngineError> {
        let requested = [
            ("use_doc_orientation_classify", self.use_doc_orientation_classify),
            ("use_doc_unwarping", self.use_doc_unwarping),
            ("use_textline_orientation", self.use_textline_orientation),
        ];

        match requested.iter().find(|(_, enabled)| *enabled) {
            Some((name, _)) => Err(EngineError::Unsupported(name.to_string())),
            None => Ok(()),
        }
    }
}

/// Raw per-image output of an engine
///
/// `rec_texts`, `rec_scores`, `rec_boxes` and `rec_polys` are index-aligned.
/// Boxes are `[left, top, right, bottom]` in original image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResult {
    pub input_path: PathBuf,
    pub rec_texts: Vec<String>,
    pub rec_scores: Vec<f32>,
    pub rec_boxes: Vec<[f32; 4]>,
    pub rec_polys: Vec<[[f32; 2]; 4]>,
}

impl PredictResult {
    pub fn empty(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            rec_texts: Vec::new(),
            rec_scores: Vec::new(),
            rec_boxes: Vec::new(),
            rec_polys: Vec::new(),
        }
    }

    /// Number of recognized lines
    pub fn len(&self) -> usize {
        self.rec_texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rec_texts.is_empty()
    }

    /// Write this result as `<dir>/<image stem>_res.json`
    pub fn save_to_json<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, EngineError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let stem = self
            .input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let target = dir.join(format!("{}_res.json", stem));

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&target, json)?;

        debug!("Saved prediction to {}", target.display());
        Ok(target)
    }
}

/// Text detection and recognition over an image file
#[cfg_attr(test, mockall::automock)]
pub trait OcrEngine: Send + Sync {
    /// Engine identifier reported by the health endpoint
    fn name(&self) -> &'static str;

    /// Run the full pipeline on one image file
    fn predict(&self, input: &Path) -> Result<Vec<PredictResult>, EngineError>;
}

/// Run `engine` on `input` and write every raw result under `dir`
///
/// Debugging aid; returns the written file paths in result order.
pub fn save_predictions(
    engine: &dyn OcrEngine,
    input: &Path,
    dir: &Path,
) -> Result<Vec<PathBuf>, EngineError> {
    engine
        .predict(input)?
        .iter()
        .map(|result| result.save_to_json(dir))
        .collect()
}
