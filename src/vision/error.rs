// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error kinds surfaced by the OCR service

use std::path::PathBuf;
use thiserror::Error;

use super::ocr::EngineError;

/// Why an OCR request failed
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("OCR engine failure: {0}")]
    EngineFailure(String),
}

impl OcrError {
    /// Stable machine-readable kind for the error envelope
    pub fn kind(&self) -> &'static str {
        match self {
            OcrError::NotFound(_) => "not_found",
            OcrError::InvalidImage(_) => "invalid_image",
            OcrError::EngineFailure(_) => "engine_failure",
        }
    }
}

impl From<EngineError> for OcrError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InputNotFound(path) => OcrError::NotFound(path),
            EngineError::Decode(msg) => OcrError::InvalidImage(msg),
            other => OcrError::EngineFailure(other.to_string()),
        }
    }
}
