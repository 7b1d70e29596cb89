// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! PaddleOCR end-to-end tests
//!
//! Need the ONNX models under OCR_MODEL_DIR; run with `--ignored`.

use image_ocr_api::vision::ocr::{OcrEngine, OcrEngineConfig, PaddleOcrEngine};
use image_ocr_api::vision::OcrAdapter;
use std::path::PathBuf;
use std::sync::Arc;

use crate::common::write_png;

const OCR_MODEL_DIR: &str = "/workspace/models/paddleocr-onnx";

fn load_engine() -> Option<PaddleOcrEngine> {
    let config = OcrEngineConfig {
        model_dir: PathBuf::from(OCR_MODEL_DIR),
        text_det_unclip_ratio: 1.0,
        ..Default::default()
    };
    match PaddleOcrEngine::new(&config) {
        Ok(engine) => Some(engine),
        Err(e) => {
            eprintln!("Skipping: {}", e);
            None
        }
    }
}

#[test]
#[ignore] // Only run if model files are downloaded
fn test_blank_page_has_no_locations() {
    let Some(engine) = load_engine() else { return };
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "blank.png", 400, 200);

    let result = OcrAdapter::new(Arc::new(engine)).recognize(&image).unwrap();

    assert_eq!(result.metadata.origin_width, 400);
    assert_eq!(result.metadata.origin_height, 200);
    assert!(result.locations.is_empty());
}

#[test]
#[ignore] // Only run if model files are downloaded
fn test_predictions_are_deterministic() {
    let Some(engine) = load_engine() else { return };
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "blank.png", 320, 240);

    let first = engine.predict(&image).unwrap();
    let second = engine.predict(&image).unwrap();
    assert_eq!(first, second);
}
