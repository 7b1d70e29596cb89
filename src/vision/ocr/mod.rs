// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PaddleOCR integration for text extraction from images
//!
//! Components:
//! - `engine` - The `OcrEngine` contract and its raw `PredictResult`
//! - `detection` - Text region detection and DB post-processing
//! - `recognition` - CTC text recognition of cropped regions
//! - `preprocessing` - Image preprocessing for both models
//! - `model` - `PaddleOcrEngine`, the combined pipeline

pub mod detection;
pub mod engine;
pub mod model;
pub mod preprocessing;
pub mod recognition;

pub use detection::{DetectionParams, OcrDetectionModel, TextBox};
pub use engine::{
    save_predictions, EngineError, OcrEngine, OcrEngineConfig, PredictResult, DEFAULT_OUTPUT_DIR,
};
pub use model::PaddleOcrEngine;
pub use recognition::{OcrRecognitionModel, RecognizedText};
