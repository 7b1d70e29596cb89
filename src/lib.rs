// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod version;
pub mod vision;

pub use api::{create_router, AppState, OcrResponse};
pub use config::{EngineArgs, ServiceConfig};
pub use vision::ocr::{OcrEngine, OcrEngineConfig, PaddleOcrEngine, PredictResult};
pub use vision::{OcrAdapter, OcrError, OcrResult, TextLocation};
