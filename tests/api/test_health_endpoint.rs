// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /health tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use image_ocr_api::api::{create_router, AppState, HealthResponse};
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::common::StubEngine;

#[tokio::test]
async fn test_health_reports_engine_and_version() {
    let state = AppState::new(Arc::new(StubEngine::with_lines(&[])), "images/test.jpg");
    let app = create_router(state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(health.status, "healthy");
    assert_eq!(health.engine, "stub");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.features, image_ocr_api::version::FEATURES);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let state = AppState::new(Arc::new(StubEngine::with_lines(&[])), "images/test.jpg");
    let app = create_router(state);

    let response = app
        .oneshot(Request::builder().uri("/ocr/upload").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
