// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, warn};

use super::response::OcrResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// GET /ocr/image - Recognize text in the configured image
///
/// Takes no parameters. Always answers 200: failures are reported in the
/// body as `{"status": "error", "message": ..., "kind": ...}` where `kind`
/// is one of `not_found`, `invalid_image` or `engine_failure`.
pub async fn ocr_image_handler(State(state): State<AppState>) -> Json<OcrResponse> {
    let adapter = state.adapter.clone();
    let image_path = state.image_path.clone();
    debug!("OCR request for {}", image_path.display());

    // Inference is CPU-bound; keep it off the async workers
    let outcome = tokio::task::spawn_blocking(move || adapter.recognize(image_path.as_path())).await;

    let response = match outcome {
        Ok(Ok(data)) => OcrResponse::success(data),
        Ok(Err(e)) => {
            let err = ApiError::from(e);
            warn!("OCR failed ({}): {}", err.kind(), err);
            OcrResponse::error(&err)
        }
        Err(e) => {
            let err = ApiError::TaskFailed(e.to_string());
            warn!("OCR task failed: {}", err);
            OcrResponse::error(&err)
        }
    };

    Json(response)
}
