//! Gemini AI provider implementation.
//!
//! Sends a single-turn `generateContent` request to Google's Gemini REST API
//! and returns the text of the first candidate.

use super::{AnswerProvider, ProviderError, ProviderMode};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model used for every question.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Upper bound on generated tokens per answer.
pub const MAX_OUTPUT_TOKENS: i32 = 500;

/// Sampling temperature; kept low for factual answers.
pub const TEMPERATURE: f64 = 0.1;

const API_KEY_HEADER: &str = "x-goog-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
    pub model: String,
    pub max_output_tokens: i32,
    pub temperature: f64,
}

impl GeminiConfig {
    pub fn new(api_key: Secret<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key,
            api_base: api_base.into(),
            model: GEMINI_MODEL.to_string(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// Gemini text provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model method. The key travels in a
    /// header so it never appears in URLs echoed by transport errors.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            method
        )
    }

    fn build_request(&self, question: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(question.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        }
    }
}

#[async_trait]
impl AnswerProvider for GeminiProvider {
    async fn answer(&self, question: &str) -> Result<String, ProviderError> {
        let request = self.build_request(question);
        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = question.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = upstream_error_detail(&error_text);

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited(detail));
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, detail
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let answer = api_response.into_answer()?;

        tracing::debug!(
            model = %self.config.model,
            answer_len = answer.len(),
            "Received answer from Gemini API"
        );

        Ok(answer)
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Live
    }
}

/// Prefer the `error.message` field of a Google API error body, falling
/// back to the raw body.
fn upstream_error_detail(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| body.trim().to_string())
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// Only text parts matter here; other part kinds deserialize with `text: None`.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: i32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_answer(self) -> Result<String, ProviderError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ProviderError::ContentFiltered(format!(
                "prompt blocked ({})",
                reason
            )));
        }

        let candidate = self.candidates.into_iter().next().ok_or_else(|| {
            ProviderError::EmptyResponse("Gemini returned no candidates".to_string())
        })?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ProviderError::ContentFiltered(
                "response blocked (SAFETY)".to_string(),
            ));
        }

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(format!(
                "Gemini returned no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider(api_base: &str) -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new(
            Secret::new("test-key".to_string()),
            api_base,
        ))
        .unwrap()
    }

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn api_url_targets_model_method() {
        let provider = provider("https://example.test/v1beta/");
        assert_eq!(
            provider.api_url("generateContent"),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn request_uses_fixed_generation_options() {
        let request = provider("http://unused").build_request("Tell me a joke");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Tell me a joke" }] }],
                "generationConfig": { "maxOutputTokens": 500, "temperature": 0.1 }
            })
        );
    }

    #[test]
    fn answer_joins_text_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello, " }, { "text": "world" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 3, "candidatesTokenCount": 2 }
        }));

        assert_eq!(response.into_answer().unwrap(), "Hello, world");
    }

    #[test]
    fn truncated_answer_is_still_returned() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "partial" }] },
                "finishReason": "MAX_TOKENS"
            }]
        }));

        assert_eq!(response.into_answer().unwrap(), "partial");
    }

    #[test]
    fn safety_finish_is_an_error() {
        let response = parse(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }));

        assert!(matches!(
            response.into_answer(),
            Err(ProviderError::ContentFiltered(_))
        ));
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let response = parse(json!({
            "promptFeedback": { "blockReason": "OTHER" }
        }));

        let err = response.into_answer().unwrap_err();
        assert_eq!(err.to_string(), "Content filtered: prompt blocked (OTHER)");
    }

    #[test]
    fn no_candidates_is_an_error() {
        let response = parse(json!({}));

        assert!(matches!(
            response.into_answer(),
            Err(ProviderError::EmptyResponse(_))
        ));
    }

    #[test]
    fn error_detail_prefers_google_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(upstream_error_detail(body), "API key not valid.");
        assert_eq!(upstream_error_detail(" upstream down \n"), "upstream down");
    }
}
