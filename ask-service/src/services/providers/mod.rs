//! Answer provider abstractions and implementations.
//!
//! The service picks exactly one provider at startup: Gemini when an API key
//! is configured, the mock otherwise. Handlers only see `AnswerProvider`.

pub mod gemini;
pub mod mock;

use crate::config::AskConfig;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use mock::MockProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Which kind of provider is serving answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    Mock,
    Live,
}

impl ProviderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderMode::Mock => "mock",
            ProviderMode::Live => "live",
        }
    }
}

/// Turns a validated, trimmed question into an answer.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    async fn answer(&self, question: &str) -> Result<String, ProviderError>;

    fn mode(&self) -> ProviderMode;
}

/// Select the provider for the process lifetime based on credential presence.
pub fn provider_from_config(config: &AskConfig) -> Result<Arc<dyn AnswerProvider>, ProviderError> {
    match &config.google.api_key {
        Some(api_key) => {
            let provider = GeminiProvider::new(GeminiConfig::new(
                api_key.clone(),
                config.google.api_base.clone(),
            ))?;
            Ok(Arc::new(provider))
        }
        None => Ok(Arc::new(MockProvider::new())),
    }
}
