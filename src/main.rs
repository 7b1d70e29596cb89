// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use image_ocr_api::{
    api::{create_router, start_server, AppState},
    vision::ocr::PaddleOcrEngine,
    ServiceConfig,
};
use std::{env, sync::Arc};
use tokio::signal;
use tracing::{info, warn};

/// Image OCR API server
#[derive(Parser, Debug)]
#[command(name = "image-ocr-api", version, about)]
struct Args {
    #[command(flatten)]
    service: ServiceConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = args.service;

    info!(
        "Starting image OCR API {}",
        image_ocr_api::version::get_version_string()
    );

    let engine_config = config.engine.to_engine_config();
    let engine = PaddleOcrEngine::new(&engine_config).with_context(|| {
        format!(
            "Failed to initialize OCR engine from {}",
            engine_config.model_dir.display()
        )
    })?;
    info!("✅ OCR engine initialized");

    if !config.image_path.exists() {
        warn!(
            "⚠️ Image {} does not exist yet; /ocr/image will report not_found",
            config.image_path.display()
        );
    }

    let state = AppState::new(Arc::new(engine), config.image_path.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    start_server(listener, app, async {
        let _ = signal::ctrl_c().await;
        info!("Shutdown signal received");
    })
    .await
    .context("HTTP server error")?;

    Ok(())
}
