// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the image OCR API

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-paddleocr-onnx-2025-10-17";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-17";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "paddleocr-onnx",
    "cpu-inference",
    "error-kinds",
    "prediction-json-dump",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("{} ({})", VERSION, BUILD_DATE)
}
