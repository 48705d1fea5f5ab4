//! Application startup and lifecycle management.

use crate::config::ClickbaitConfig;
use crate::handlers::{self, prompt::handle_prompt};
use crate::services::metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use axum::{middleware::from_fn, routing::{any, get}, Router};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{http_trace_layer, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub text_provider: Arc<dyn TextProvider>,
}

impl AppState {
    pub fn new(text_provider: Arc<dyn TextProvider>) -> Self {
        Self { text_provider }
    }
}

/// Router with the prompt endpoint on `/` (and every unclaimed path) plus
/// health and metrics endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handle_prompt))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .fallback(handle_prompt)
        .layer(from_fn(security_headers_middleware))
        .layer(http_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ClickbaitConfig) -> Result<Self, AppError> {
        metrics::init_metrics();

        let provider = GeminiTextProvider::new(GeminiConfig::from_settings(&config.gemini))
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            model = %provider.model(),
            endpoint = %config.gemini.api_base_url,
            "Initialized Gemini text provider"
        );

        let state = AppState::new(Arc::new(provider));

        // Port 0 picks a random port, used by tests
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Clickbait service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM, letting in-flight requests finish.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
