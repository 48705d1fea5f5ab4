use crate::services::metrics;
use crate::services::providers::ProviderError;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const INVALID_METHOD_MESSAGE: &str = "Solo se aceptan solicitudes POST";
pub const REQUEST_FAILED_MESSAGE: &str = "Error en la solicitud";

/// Failures of the prompt endpoint.
///
/// Only the method check is reported distinctly; everything after it is a
/// generic 500 so no upstream detail reaches the caller.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Method not allowed: {0}")]
    InvalidMethod(Method),

    #[error("Invalid request body: {0}")]
    BadRequestBody(anyhow::Error),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(#[from] ProviderError),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::BadRequestBody(anyhow::Error::new(err))
    }
}

impl From<axum::Error> for HandlerError {
    fn from(err: axum::Error) -> Self {
        HandlerError::BadRequestBody(anyhow::Error::new(err))
    }
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::InvalidMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
            HandlerError::BadRequestBody(_) | HandlerError::UpstreamFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            HandlerError::InvalidMethod(_) => "invalid_method",
            HandlerError::BadRequestBody(_) => "bad_request_body",
            HandlerError::UpstreamFailure(_) => "upstream_failure",
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        metrics::record_prompt_request(self.outcome());

        match self {
            HandlerError::InvalidMethod(method) => {
                tracing::debug!(method = %method, "Rejected non-POST request");
                (StatusCode::METHOD_NOT_ALLOWED, INVALID_METHOD_MESSAGE).into_response()
            }
            err => {
                tracing::error!(error = %err, "Error al procesar la solicitud");
                (err.status(), REQUEST_FAILED_MESSAGE).into_response()
            }
        }
    }
}
