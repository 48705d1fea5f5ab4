//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use crate::config::{MODEL_ID, SYSTEM_INSTRUCTION};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum Outcome {
    Text(String),
    Echo,
    Fail(String),
}

/// Mock text provider that answers with a canned text or a canned failure and
/// records every prompt it receives.
pub struct MockTextProvider {
    outcome: Outcome,
    ready: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Always answers `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Text(text.into()))
    }

    /// Answers with the prompt itself, prefixed; handy for checking that
    /// requests do not bleed into each other.
    pub fn echoing() -> Self {
        Self::with_outcome(Outcome::Echo)
    }

    /// Always fails with an upstream API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail(message.into()))
    }

    /// Reports itself as not ready on the readiness probe.
    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            ready: true,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.outcome {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::Echo => Ok(format!("Mock response for: {}", prompt)),
            Outcome::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    fn model(&self) -> &str {
        MODEL_ID
    }

    fn system_instruction(&self) -> &str {
        SYSTEM_INSTRUCTION
    }

    fn health_check(&self) -> Result<(), ProviderError> {
        if self.ready {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not ready".to_string(),
            ))
        }
    }
}
