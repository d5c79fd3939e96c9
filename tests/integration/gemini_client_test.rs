// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toolscout::config::settings::LlmSettings;
use toolscout::domain::models::crawl::{AnalysisOutcome, CrawlOutcome};
use toolscout::domain::services::analysis_service::AnalysisService;
use toolscout::infrastructure::llm::gemini_client::GeminiClient;

fn llm_settings(base_url: &str) -> LlmSettings {
    LlmSettings {
        api_key: "test-key".to_string(),
        model: "gemini-1.5-flash".to_string(),
        base_url: base_url.to_string(),
        temperature: 0.4,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 8192,
    }
}

fn outcome() -> CrawlOutcome {
    CrawlOutcome {
        final_url: "https://example.com/".to_string(),
        title: Some("Example".to_string()),
        content: "Un outil de génération vidéo.".to_string(),
        pages_discovered: 1,
        pages_processed: 1,
        content_length: 29,
    }
}

#[tokio::test]
async fn test_generate_text_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "topK": 40 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Réponse générée" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&llm_settings(&server.uri()));
    let text = client.generate_text("bonjour").await.unwrap();
    assert_eq!(text, "Réponse générée");
}

#[tokio::test]
async fn test_http_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&llm_settings(&server.uri()));
    let err = client.generate_text("bonjour").await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_empty_candidates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&llm_settings(&server.uri()));
    assert!(client.generate_text("bonjour").await.is_err());
}

#[tokio::test]
async fn test_missing_api_key_fails_without_request() {
    let mut settings = llm_settings("http://127.0.0.1:1");
    settings.api_key = String::new();

    let client = GeminiClient::new(&settings);
    let err = client.generate_text("bonjour").await.unwrap_err();
    assert!(err.to_string().contains("API key"));
}

#[tokio::test]
async fn test_analysis_service_decodes_fenced_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{
                    "text": "```json\n{\"name\": \"Example\", \"summary\": \"Outil vidéo\"}\n```"
                }] }
            }]
        })))
        .mount(&server)
        .await;

    let client = Arc::new(GeminiClient::new(&llm_settings(&server.uri())));
    let service = AnalysisService::new(client);

    let analysis = service.analyze_content(&outcome()).await.unwrap();
    let structured = analysis.as_structured().unwrap();
    assert_eq!(structured["name"], "Example");
}

#[tokio::test]
async fn test_analysis_service_raw_fallback_and_null_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "réponse libre sans structure" }] }
            }]
        })))
        .mount(&server)
        .await;

    let client = Arc::new(GeminiClient::new(&llm_settings(&server.uri())));
    let service = AnalysisService::new(client);

    // Undecodable output degrades to the raw variant, not to null
    match service.analyze_content(&outcome()).await.unwrap() {
        AnalysisOutcome::Raw(text) => assert!(text.contains("réponse libre")),
        AnalysisOutcome::Structured(_) => panic!("expected raw fallback"),
    }

    // Transport failure is the only case that yields no analysis at all
    let dead = Arc::new(GeminiClient::new(&llm_settings("http://127.0.0.1:1")));
    let service = AnalysisService::new(dead);
    assert!(service.analyze_content(&outcome()).await.is_none());
}
