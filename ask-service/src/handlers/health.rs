use crate::services::metrics::get_metrics;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;

/// Liveness check. Reports which provider mode the process runs in.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "ask-service",
            "version": env!("CARGO_PKG_VERSION"),
            "mode": state.provider.mode().as_str()
        })),
    )
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        get_metrics(),
    )
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(anyhow::anyhow!("Method not allowed"))
}
