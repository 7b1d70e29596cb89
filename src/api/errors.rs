// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vision::OcrError;

/// Body of a failed OCR request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
    pub kind: String,
}

#[derive(Debug)]
pub enum ApiError {
    Ocr(OcrError),
    /// The blocking OCR task panicked or was cancelled
    TaskFailed(String),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Ocr(err) => err.kind(),
            ApiError::TaskFailed(_) => "engine_failure",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
            kind: self.kind().to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Ocr(err) => write!(f, "{}", err),
            ApiError::TaskFailed(msg) => write!(f, "OCR task failed: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<OcrError> for ApiError {
    fn from(err: OcrError) -> Self {
        ApiError::Ocr(err)
    }
}
