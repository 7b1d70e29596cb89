// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for CPU-based OCR
//!
//! This module provides:
//! - The OCR engine contract and a PaddleOCR ONNX implementation
//! - Image metadata lookup
//! - The adapter that reshapes engine output into `OcrResult`

pub mod error;
pub mod image_utils;
pub mod ocr;
pub mod result_adapter;

pub use error::OcrError;
pub use image_utils::{read_image_metadata, ImageMetadata};
pub use result_adapter::{to_locations, OcrAdapter, OcrResult, TextLocation};
