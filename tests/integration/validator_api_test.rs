// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{routing::post, Extension, Router};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toolscout::engines::probe_engine::ProbeEngine;
use toolscout::presentation::handlers::validator_handler::url_validator;

use super::helpers::{test_tool, MockToolRepository};

fn test_server(repo: Arc<MockToolRepository>) -> TestServer {
    let probe = Arc::new(ProbeEngine::new(Duration::from_secs(5), "toolscout-test"));
    let app = Router::new()
        .route(
            "/v1/admin/url-validator",
            post(url_validator::<MockToolRepository>),
        )
        .layer(Extension(repo))
        .layer(Extension(probe));
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_valid_url_activates_tool() {
    let upstream = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&upstream)
        .await;

    let mut tool = test_tool("runway", &upstream.uri());
    tool.is_active = false;
    let tool_id = tool.id;
    let repo = Arc::new(MockToolRepository::with_tools(vec![tool]));

    let server = test_server(repo.clone());
    let response = server
        .post("/v1/admin/url-validator")
        .json(&json!({ "url": upstream.uri(), "toolId": tool_id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["isValid"], true);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["isRedirected"], false);

    // The terminal state drives the persisted flag
    assert!(repo.get(tool_id).unwrap().is_active);
}

#[tokio::test]
async fn test_not_found_deactivates_tool() {
    let upstream = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;
    // The probe retries a terminal 404 with GET before giving up
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let tool = test_tool("brokentool", &upstream.uri());
    let tool_id = tool.id;
    let repo = Arc::new(MockToolRepository::with_tools(vec![tool]));

    let server = test_server(repo.clone());
    let response = server
        .post("/v1/admin/url-validator")
        .json(&json!({ "url": upstream.uri(), "toolId": tool_id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["isValid"], false);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["isRedirected"], false);
    assert_eq!(body["status"], "client_error");

    assert!(!repo.get(tool_id).unwrap().is_active);
}

#[tokio::test]
async fn test_redirect_chain_is_followed_and_reported() {
    let upstream = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", format!("{}/final", upstream.uri()).as_str()),
        )
        .mount(&upstream)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&upstream)
        .await;

    let repo = Arc::new(MockToolRepository::with_tools(vec![]));
    let server = test_server(repo);
    let response = server
        .post("/v1/admin/url-validator")
        .json(&json!({ "url": upstream.uri() }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["isValid"], true);
    assert_eq!(body["isRedirected"], true);
    assert_eq!(body["redirectChain"], json!(["301", "200"]));
    assert!(body["finalUrl"].as_str().unwrap().ends_with("/final"));
}

#[tokio::test]
async fn test_dns_failure_deactivates_with_sentinel_code() {
    let mut tool = test_tool("ghosttool", "https://nonexistent-host.invalid");
    tool.is_active = true;
    let tool_id = tool.id;
    let repo = Arc::new(MockToolRepository::with_tools(vec![tool]));

    let server = test_server(repo.clone());
    let response = server
        .post("/v1/admin/url-validator")
        .json(&json!({ "url": "https://nonexistent-host.invalid", "toolId": tool_id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["isValid"], false);
    assert_eq!(body["statusCode"], -1);
    assert_eq!(body["status"], "dns_failure");

    assert!(!repo.get(tool_id).unwrap().is_active);
}

#[tokio::test]
async fn test_unknown_tool_reference_is_404() {
    let upstream = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&upstream)
        .await;

    let repo = Arc::new(MockToolRepository::with_tools(vec![]));
    let server = test_server(repo);
    let response = server
        .post("/v1/admin/url-validator")
        .json(&json!({ "url": upstream.uri(), "slug": "missing" }))
        .await;

    response.assert_status_not_found();
}
