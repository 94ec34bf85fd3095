#![allow(dead_code)]

use ask_service::config::AskConfig;
use ask_service::services::providers::{AnswerProvider, ProviderError, ProviderMode};
use ask_service::{build_router, AppState};
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

/// Loopback config on a random port with the given variables.
pub fn config_with(vars: Vec<(&'static str, String)>) -> AskConfig {
    let common = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    AskConfig::from_lookup(common, move |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    })
}

/// Router in mock mode (no credential).
pub fn mock_app() -> Router {
    let state = AppState::from_config(config_with(vec![])).expect("mock state");
    build_router(state)
}

/// Router in live mode pointed at a fake Gemini server.
pub fn live_app(api_base: &str) -> Router {
    let state = AppState::from_config(config_with(vec![
        ("GOOGLE_API_KEY", "fake-key".to_string()),
        ("GEMINI_API_BASE", api_base.to_string()),
    ]))
    .expect("live state");
    build_router(state)
}

/// Provider that always fails with the given error.
pub struct FailingProvider {
    pub make_error: fn() -> ProviderError,
}

#[async_trait]
impl AnswerProvider for FailingProvider {
    async fn answer(&self, _question: &str) -> Result<String, ProviderError> {
        Err((self.make_error)())
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Live
    }
}

pub fn app_with_provider(provider: Arc<dyn AnswerProvider>) -> Router {
    build_router(AppState {
        config: config_with(vec![]),
        provider,
    })
}

pub fn ask_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}
