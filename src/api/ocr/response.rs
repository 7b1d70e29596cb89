// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR response envelope

use serde::Serialize;

use crate::api::errors::{ApiError, ErrorResponse};
use crate::vision::OcrResult;

/// `{"status": "success", "data": ...}` or
/// `{"status": "error", "message": ..., "kind": ...}`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OcrResponse {
    Success {
        data: OcrResult,
    },
    Error {
        message: String,
        kind: String,
    },
}

impl OcrResponse {
    pub fn success(data: OcrResult) -> Self {
        OcrResponse::Success { data }
    }

    pub fn error(err: &ApiError) -> Self {
        let ErrorResponse { message, kind } = err.to_response();
        OcrResponse::Error { message, kind }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OcrResponse::Success { .. })
    }
}
