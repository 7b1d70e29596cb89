// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::ocr::ocr_image_handler;
use crate::vision::{ocr::OcrEngine, OcrAdapter};

/// Shared handler state; the engine is constructed once and injected here
#[derive(Clone)]
pub struct AppState {
    pub adapter: OcrAdapter,
    pub image_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(engine: Arc<dyn OcrEngine>, image_path: impl Into<PathBuf>) -> Self {
        Self {
            adapter: OcrAdapter::new(engine),
            image_path: Arc::new(image_path.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub engine: String,
    pub version: String,
    pub features: Vec<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ocr/image", get(ocr_image_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` until `shutdown` resolves
pub async fn start_server<F>(
    listener: tokio::net::TcpListener,
    app: Router,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        engine: state.adapter.engine_name().to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        features: crate::version::FEATURES
            .iter()
            .map(|f| f.to_string())
            .collect(),
    })
}
