use crate::dtos::{PromptRequest, PromptResponse};
use crate::error::HandlerError;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::Method,
    Json,
};
use std::time::Instant;

/// Largest request body read before giving up.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Answer a headline with the model's take on it.
///
/// The body is parsed as JSON whatever its `Content-Type`, and the method is
/// checked before the body is read.
pub async fn handle_prompt(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<PromptResponse>, HandlerError> {
    if req.method() != Method::POST {
        return Err(HandlerError::InvalidMethod(req.method().clone()));
    }

    let body = to_bytes(req.into_body(), MAX_BODY_BYTES).await?;
    let request: PromptRequest = serde_json::from_slice(&body)?;

    let provider = &state.text_provider;
    let started = Instant::now();
    let result = provider.generate(&request.user_prompt).await;
    metrics::record_provider_latency(provider.model(), started.elapsed().as_secs_f64());

    let text = result.map_err(|e| {
        metrics::record_provider_error(provider.model(), e.kind());
        e
    })?;

    tracing::info!(
        model = %provider.model(),
        prompt_len = request.user_prompt.len(),
        response_len = text.len(),
        "Prompt answered"
    );
    metrics::record_prompt_request("success");

    Ok(Json(PromptResponse { response: text }))
}
