//! Application startup and lifecycle management.

use crate::config::AskConfig;
use crate::handlers;
use crate::services::providers::{provider_from_config, AnswerProvider, ProviderMode};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, request_trace_layer},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state. Read-only for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub config: AskConfig,
    pub provider: Arc<dyn AnswerProvider>,
}

impl AppState {
    /// Build the state, choosing the provider from the credential.
    pub fn from_config(config: AskConfig) -> Result<Self, AppError> {
        let provider = provider_from_config(&config).map_err(|e| {
            tracing::error!("Failed to initialize answer provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        Ok(Self { config, provider })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(handlers::ask))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route_layer(from_fn(metrics_middleware))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .layer(from_fn(security_headers_middleware))
        .layer(request_trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
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

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AskConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Bind the listener and router around an already assembled state.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        match state.provider.mode() {
            ProviderMode::Live => tracing::info!(mode = "live", "Initialized Gemini answer provider"),
            ProviderMode::Mock => {
                tracing::info!(mode = "mock", "GOOGLE_API_KEY not set, serving mocked answers")
            }
        }

        // Port 0 = random port for testing
        let addr = state.config.common.bind_address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Ask service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
