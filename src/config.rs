// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line and environment configuration

use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::vision::ocr::OcrEngineConfig;

/// Image read by `GET /ocr/image`
pub const DEFAULT_IMAGE_PATH: &str = "images/test.jpg";

/// OCR engine options shared by the server and the CLI
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Directory with det_model.onnx, rec_model.onnx and ppocr_keys_v1.txt
    #[arg(long, env = "OCR_MODEL_DIR", default_value = "./models/paddleocr-onnx")]
    pub model_dir: PathBuf,

    /// Box expansion ratio applied after detection
    #[arg(long, env = "OCR_UNCLIP_RATIO", default_value_t = 1.0)]
    pub unclip_ratio: f32,

    /// Pixel threshold on the detection probability map
    #[arg(long, env = "OCR_DET_THRESH", default_value_t = 0.3)]
    pub det_thresh: f32,

    /// Minimum mean probability of a kept box
    #[arg(long, env = "OCR_BOX_THRESH", default_value_t = 0.6)]
    pub box_thresh: f32,
}

impl EngineArgs {
    /// Engine config with orientation classification and unwarping disabled
    pub fn to_engine_config(&self) -> OcrEngineConfig {
        OcrEngineConfig {
            model_dir: self.model_dir.clone(),
            use_doc_orientation_classify: false,
            use_doc_unwarping: false,
            use_textline_orientation: false,
            text_det_unclip_ratio: self.unclip_ratio,
            text_det_thresh: self.det_thresh.clamp(0.0, 1.0),
            text_det_box_thresh: self.box_thresh.clamp(0.0, 1.0),
        }
    }
}

/// HTTP service configuration
#[derive(Args, Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: SocketAddr,

    /// Image recognized by GET /ocr/image
    #[arg(long, env = "OCR_IMAGE_PATH", default_value = DEFAULT_IMAGE_PATH)]
    pub image_path: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}
