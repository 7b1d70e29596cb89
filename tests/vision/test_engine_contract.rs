// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Adapter and dump helper against an injected engine

use image_ocr_api::vision::ocr::{save_predictions, PredictResult};
use image_ocr_api::vision::{read_image_metadata, OcrAdapter, OcrError};
use std::sync::Arc;

use crate::common::{receipt_lines, write_png, StubEngine};

#[test]
fn test_metadata_matches_written_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "page.png", 123, 45);

    let metadata = read_image_metadata(&image).unwrap();
    assert_eq!(metadata.origin_width, 123);
    assert_eq!(metadata.origin_height, 45);
    assert_eq!(metadata.size, std::fs::metadata(&image).unwrap().len());
}

#[test]
fn test_adapter_uses_injected_engine() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "page.png", 200, 100);
    let engine = Arc::new(StubEngine::with_lines(&receipt_lines()));

    let adapter = OcrAdapter::new(engine.clone());
    let result = adapter.recognize(&image).unwrap();

    assert_eq!(adapter.engine_name(), "stub");
    assert_eq!(engine.calls(), 1);
    assert_eq!(result.locations.len(), 2);
    assert_eq!(result.locations[0].text, "Hello");
    assert_eq!(result.locations[1].x, 15.0);
}

#[test]
fn test_adapter_maps_engine_failure() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "page.png", 20, 20);

    let err = OcrAdapter::new(Arc::new(StubEngine::failing("out of memory")))
        .recognize(&image)
        .unwrap_err();

    assert!(matches!(err, OcrError::EngineFailure(_)));
}

#[test]
fn test_dump_writes_raw_prediction() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "receipt.png", 200, 100);
    let output = dir.path().join("output");
    let engine = StubEngine::with_lines(&receipt_lines());

    let written = save_predictions(&engine, &image, &output).unwrap();

    assert_eq!(written, vec![output.join("receipt_res.json")]);
    let saved: PredictResult =
        serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(saved.rec_texts, vec!["Hello", "World"]);
    assert_eq!(saved.rec_boxes[0], [10.0, 20.0, 110.0, 50.0]);
}

#[test]
fn test_dump_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");
    let engine = StubEngine::with_lines(&receipt_lines());

    let result = save_predictions(&engine, &dir.path().join("missing.jpg"), &output);

    assert!(result.is_err());
    assert!(!output.exists());
}
