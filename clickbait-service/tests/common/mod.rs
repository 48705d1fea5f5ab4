#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use clickbait_service::config::{ClickbaitConfig, GeminiSettings};
use clickbait_service::startup::Application;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-gemini-key";

/// A request received by the fake Gemini endpoint.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub model_call: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    reply: Value,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

/// Local stand-in for the Gemini REST API.
pub struct FakeGemini {
    pub base_url: String,
    calls: Arc<Mutex<Vec<CapturedCall>>>,
}

impl FakeGemini {
    /// Reply to every `generateContent` call with `text` as a single part.
    pub async fn answering(text: &str) -> Self {
        Self::spawn(
            StatusCode::OK,
            serde_json::json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": text }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 5 }
            }),
        )
        .await
    }

    pub async fn spawn(status: StatusCode, reply: Value) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status,
            reply,
            calls: calls.clone(),
        };

        let router = Router::new()
            .route("/models/:model_call", post(fake_generate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake Gemini listener");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn fake_generate(
    State(state): State<FakeState>,
    Path(model_call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    state.calls.lock().unwrap().push(CapturedCall {
        model_call,
        api_key,
        body,
    });

    (state.status, Json(state.reply.clone()))
}

pub fn test_config(gemini_base_url: &str) -> ClickbaitConfig {
    let mut gemini = GeminiSettings::with_api_key(TEST_API_KEY);
    gemini.api_base_url = gemini_base_url.to_string();
    gemini.timeout = Duration::from_secs(5);

    ClickbaitConfig {
        common: service_core::config::Config {
            port: 0,
            ..Default::default()
        },
        gemini,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Run the full server on a random port against `gemini_base_url`.
    pub async fn spawn(gemini_base_url: &str) -> Self {
        let app = Application::build(test_config(gemini_base_url))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let address = format!("http://127.0.0.1:{}", port);

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", address))
                .send()
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Self { address, port }
    }
}
