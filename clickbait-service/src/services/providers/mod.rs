//! Text generation provider abstraction.
//!
//! The handler depends only on [`TextProvider`], so the Gemini client can be
//! swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::Blocked(_) => "blocked",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// A model client bound to one model and one system instruction.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text answer for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// System instruction sent with every request.
    fn system_instruction(&self) -> &str;

    /// Cheap readiness probe; must not call the upstream API.
    fn health_check(&self) -> Result<(), ProviderError>;
}
