// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR API endpoint module
//!
//! Provides GET /ocr/image for recognizing text in the configured image.

pub mod handler;
pub mod response;

pub use handler::ocr_image_handler;
pub use response::OcrResponse;
