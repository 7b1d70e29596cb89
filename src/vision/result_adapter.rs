// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Reshapes raw engine output into the service's response shape

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::OcrError;
use super::image_utils::{read_image_metadata, ImageMetadata};
use super::ocr::{OcrEngine, PredictResult};

/// One recognized text line with its rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLocation {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Engine-reported score (0.0-1.0)
    pub confidence: f32,
}

/// Image metadata plus recognized locations in engine order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    #[serde(flatten)]
    pub metadata: ImageMetadata,
    pub locations: Vec<TextLocation>,
}

/// Convert one engine result into locations, keeping engine order
///
/// # Errors
/// `OcrError::EngineFailure` if texts, boxes and scores are not the same length.
pub fn to_locations(result: &PredictResult) -> Result<Vec<TextLocation>, OcrError> {
    let (texts, boxes, scores) = (&result.rec_texts, &result.rec_boxes, &result.rec_scores);
    if boxes.len() != result.len() || scores.len() != result.len() {
        return Err(OcrError::EngineFailure(format!(
            "misaligned engine output: {} texts, {} boxes, {} scores",
            result.len(),
            boxes.len(),
            scores.len()
        )));
    }

    let locations = texts
        .iter()
        .zip(boxes)
        .zip(scores)
        .map(|((text, &[left, top, right, bottom]), &confidence)| TextLocation {
            text: text.clone(),
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
            confidence,
        })
        .collect();

    Ok(locations)
}

/// Runs the injected engine and merges its output with file metadata
#[derive(Clone)]
pub struct OcrAdapter {
    engine: Arc<dyn OcrEngine>,
}

impl OcrAdapter {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Recognize the image at `path`
    ///
    /// Metadata is read before the engine runs, so a missing file is
    /// reported as `NotFound` whatever the engine would say. The engine is
    /// called once. If it returns several results, each one replaces the
    /// previous locations, so the last result wins; no result leaves
    /// `locations` empty.
    pub fn recognize<P: AsRef<Path>>(&self, path: P) -> Result<OcrResult, OcrError> {
        let path = path.as_ref();
        debug!("Running {} on {}", self.engine.name(), path.display());

        let metadata = read_image_metadata(path)?;
        let results = self.engine.predict(path)?;

        let mut locations = Vec::new();
        for result in &results {
            locations = to_locations(result)?;
        }

        info!(
            "Recognized {} text regions in {} ({}x{}, {} bytes)",
            locations.len(),
            path.display(),
            metadata.origin_width,
            metadata.origin_height,
            metadata.size
        );

        Ok(OcrResult {
            metadata,
            locations,
        })
    }
}
