// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /ocr/image tests
//!
//! The router is driven in-process with a stub engine, so no model files
//! are needed. Every outcome must be answered with HTTP 200.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use image_ocr_api::{
    api::{create_router, AppState},
    vision::ocr::OcrEngine,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{receipt_lines, write_png, StubEngine};

fn app_with(engine: Arc<dyn OcrEngine>, image: &Path) -> Router {
    create_router(AppState::new(engine, image))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[cfg(test)]
mod ocr_endpoint_tests {
    use super::*;

    /// Success envelope carries metadata and locations
    #[tokio::test]
    async fn test_success_response_shape() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 640, 480);
        let size = std::fs::metadata(&image).unwrap().len();

        let app = app_with(Arc::new(StubEngine::with_lines(&receipt_lines())), &image);
        let (status, body) = get_json(app, "/ocr/image").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["size"], json!(size));
        assert_eq!(body["data"]["originWidth"], 640);
        assert_eq!(body["data"]["originHeight"], 480);
        assert!(body.get("message").is_none());
    }

    /// Boxes become x/y/width/height in engine order
    #[tokio::test]
    async fn test_locations_follow_engine_output() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 200, 100);

        let app = app_with(Arc::new(StubEngine::with_lines(&receipt_lines())), &image);
        let (_, body) = get_json(app, "/ocr/image").await;

        let locations = body["data"]["locations"].as_array().unwrap();
        assert_eq!(locations.len(), 2);

        assert_eq!(locations[0]["text"], "Hello");
        assert_eq!(locations[0]["x"], 10.0);
        assert_eq!(locations[0]["y"], 20.0);
        assert_eq!(locations[0]["width"], 100.0);
        assert_eq!(locations[0]["height"], 30.0);

        assert_eq!(locations[1]["text"], "World");
        assert_eq!(locations[1]["width"], 80.0);
        assert_eq!(locations[1]["height"], 24.0);

        let confidence = locations[1]["confidence"].as_f64().unwrap();
        assert!((confidence - 0.87).abs() < 1e-6);
    }

    /// Every confidence lies in [0, 1]
    #[tokio::test]
    async fn test_confidences_within_unit_range() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 200, 100);
        let lines = [
            ("zero", [0.0, 0.0, 10.0, 10.0], 0.0),
            ("mid", [0.0, 20.0, 10.0, 30.0], 0.5),
            ("one", [0.0, 40.0, 10.0, 50.0], 1.0),
        ];

        let app = app_with(Arc::new(StubEngine::with_lines(&lines)), &image);
        let (_, body) = get_json(app, "/ocr/image").await;

        let locations = body["data"]["locations"].as_array().unwrap();
        assert_eq!(locations.len(), 3);
        for location in locations {
            let confidence = location["confidence"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&confidence), "{}", location);
        }
    }

    /// Format is sniffed from the bytes, so a PNG named .jpg still works
    #[tokio::test]
    async fn test_png_with_jpg_extension_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "source.png", 64, 48);
        let image = dir.path().join("test.jpg");
        std::fs::copy(&png, &image).unwrap();

        let app = app_with(Arc::new(StubEngine::with_lines(&receipt_lines())), &image);
        let (status, body) = get_json(app, "/ocr/image").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["originWidth"], 64);
        assert_eq!(body["data"]["originHeight"], 48);
    }

    /// An image without text still succeeds
    #[tokio::test]
    async fn test_no_text_gives_empty_locations() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "blank.png", 32, 32);

        let app = app_with(Arc::new(StubEngine::with_lines(&[])), &image);
        let (_, body) = get_json(app, "/ocr/image").await;

        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["locations"], json!([]));
    }

    /// Missing image is reported in the body, not the status line
    #[tokio::test]
    async fn test_missing_image_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("absent.jpg");
        let engine = Arc::new(StubEngine::with_lines(&receipt_lines()));

        let app = app_with(engine.clone(), &image);
        let (status, body) = get_json(app, "/ocr/image").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert_eq!(body["kind"], "not_found");
        assert!(body["message"].as_str().unwrap().contains("absent.jpg"));
        assert!(body.get("data").is_none());
        assert_eq!(engine.calls(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_image_reports_invalid_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("test.jpg");
        std::fs::write(&image, b"definitely not a jpeg").unwrap();

        let app = app_with(Arc::new(StubEngine::with_lines(&receipt_lines())), &image);
        let (status, body) = get_json(app, "/ocr/image").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert_eq!(body["kind"], "invalid_image");
    }

    #[tokio::test]
    async fn test_engine_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 64, 64);

        let app = app_with(Arc::new(StubEngine::failing("session crashed")), &image);
        let (status, body) = get_json(app, "/ocr/image").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert_eq!(body["kind"], "engine_failure");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("session crashed"));
    }

    /// Same image, same engine, same body
    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 300, 150);
        let engine = Arc::new(StubEngine::with_lines(&receipt_lines()));
        let app = app_with(engine.clone(), &image);

        let (_, first) = get_json(app.clone(), "/ocr/image").await;
        let (_, second) = get_json(app, "/ocr/image").await;

        assert_eq!(first, second);
        assert_eq!(engine.calls(), 2);
    }

    /// Cross-origin callers are allowed
    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 16, 16);
        let app = app_with(Arc::new(StubEngine::with_lines(&[])), &image);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/ocr/image")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 16, 16);
        let app = app_with(Arc::new(StubEngine::with_lines(&[])), &image);

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/ocr/image")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn test_post_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_png(dir.path(), "test.png", 16, 16);
        let app = app_with(Arc::new(StubEngine::with_lines(&[])), &image);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/ocr/image")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
