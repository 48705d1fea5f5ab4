//! End-to-end tests: the real server and Gemini client against a fake upstream.

mod common;

use axum::http::StatusCode;
use clickbait_service::error::{INVALID_METHOD_MESSAGE, REQUEST_FAILED_MESSAGE};
use common::{FakeGemini, TestApp};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn post_prompt_round_trips_through_gemini() {
    let fake = FakeGemini::answering("Answer text").await;
    let app = TestApp::spawn(&fake.base_url).await;

    let response = Client::new()
        .post(&app.address)
        .json(&json!({ "user_prompt": "Some headline" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "response": "Answer text" }));

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body["contents"][0]["parts"][0]["text"], "Some headline");
}

#[tokio::test]
async fn get_is_rejected_before_reaching_gemini() {
    let fake = FakeGemini::answering("unused").await;
    let app = TestApp::spawn(&fake.base_url).await;

    let response = Client::new()
        .get(&app.address)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.text().await.unwrap(), INVALID_METHOD_MESSAGE);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn upstream_failure_surfaces_as_generic_500() {
    let fake = FakeGemini::spawn(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "message": "backend exploded" } }),
    )
    .await;
    let app = TestApp::spawn(&fake.base_url).await;

    let response = Client::new()
        .post(&app.address)
        .json(&json!({ "user_prompt": "Titular" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text().await.unwrap(), REQUEST_FAILED_MESSAGE);
    assert_eq!(fake.calls().len(), 1);
}

#[tokio::test]
async fn metrics_endpoint_reports_prompt_outcomes() {
    let fake = FakeGemini::answering("ok").await;
    let app = TestApp::spawn(&fake.base_url).await;
    let client = Client::new();

    client
        .post(&app.address)
        .json(&json!({ "user_prompt": "Titular" }))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .get(format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.unwrap();
    assert!(text.contains("prompt_requests_total"));
    assert!(text.contains("genai_provider_latency_seconds"));
}
