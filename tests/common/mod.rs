// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for integration tests
#![allow(dead_code)]

use image::{Rgb, RgbImage};
use image_ocr_api::vision::ocr::{EngineError, OcrEngine, PredictResult};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Engine returning canned output without loading any model
pub struct StubEngine {
    texts: Vec<String>,
    boxes: Vec<[f32; 4]>,
    scores: Vec<f32>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StubEngine {
    pub fn with_lines(lines: &[(&str, [f32; 4], f32)]) -> Self {
        Self {
            texts: lines.iter().map(|(t, _, _)| t.to_string()).collect(),
            boxes: lines.iter().map(|(_, b, _)| *b).collect(),
            scores: lines.iter().map(|(_, _, s)| *s).collect(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::with_lines(&[])
        }
    }

    /// Number of `predict` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for StubEngine {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn predict(&self, input: &Path) -> Result<Vec<PredictResult>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(EngineError::Model(message.clone()));
        }
        if !input.exists() {
            return Err(EngineError::InputNotFound(input.to_path_buf()));
        }

        Ok(vec![PredictResult {
            input_path: input.to_path_buf(),
            rec_texts: self.texts.clone(),
            rec_scores: self.scores.clone(),
            rec_boxes: self.boxes.clone(),
            rec_polys: Vec::new(),
        }])
    }
}

/// Write a white PNG of the given size and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

/// Two lines of a receipt, in engine order
pub fn receipt_lines() -> Vec<(&'static str, [f32; 4], f32)> {
    vec![
        ("Hello", [10.0, 20.0, 110.0, 50.0], 0.98),
        ("World", [15.0, 60.0, 95.0, 84.0], 0.87),
    ]
}
