// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderValue;
use axum::Extension;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use toolscout::domain::services::analysis_service::AnalysisService;
use toolscout::presentation::routes;

use super::helpers::{test_settings, MockTextGenerator};

#[tokio::test]
async fn test_health_check() {
    let settings = Arc::new(test_settings(""));
    let server = TestServer::new(routes::routes(settings)).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_version() {
    let settings = Arc::new(test_settings(""));
    let server = TestServer::new(routes::routes(settings)).unwrap();

    let response = server.get("/v1/version").await;
    response.assert_status_ok();
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let settings = Arc::new(test_settings("secret"));
    let server = TestServer::new(routes::routes(settings)).unwrap();

    let response = server
        .post("/v1/admin/analyze")
        .json(&json!({ "content": "contenu" }))
        .await;
    response.assert_status_unauthorized();

    let response = server
        .post("/v1/admin/analyze")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer wrong"))
        .json(&json!({ "content": "contenu" }))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_analyze_endpoint_with_token() {
    let settings = Arc::new(test_settings("secret"));
    let generator = Arc::new(MockTextGenerator::with_response(
        "```json\n{\"name\": \"Runway\", \"summary\": \"Outil vidéo\"}\n```",
    ));
    let analysis = Arc::new(AnalysisService::new(generator));

    let app = routes::routes(settings.clone())
        .layer(Extension(settings))
        .layer(Extension(analysis));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/v1/admin/analyze")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer secret"))
        .json(&json!({ "content": "Générez des vidéos", "title": "Runway" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["analysis"]["structured"]["name"], "Runway");
}

#[tokio::test]
async fn test_analyze_rejects_empty_content() {
    let settings = Arc::new(test_settings(""));
    let generator = Arc::new(MockTextGenerator::failing());
    let analysis = Arc::new(AnalysisService::new(generator));

    let app = routes::routes(settings.clone())
        .layer(Extension(settings))
        .layer(Extension(analysis));
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/v1/admin/analyze")
        .json(&json!({ "content": "" }))
        .await;
    response.assert_status_bad_request();
}
