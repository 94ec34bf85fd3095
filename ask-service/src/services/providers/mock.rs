//! Canned provider used when no Gemini credential is configured.

use super::{AnswerProvider, ProviderError, ProviderMode};
use async_trait::async_trait;

/// Echoes the question back without calling out.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn canned_answer(question: &str) -> String {
        format!("[mocked answer] You asked: \"{}\"", question)
    }
}

#[async_trait]
impl AnswerProvider for MockProvider {
    async fn answer(&self, question: &str) -> Result<String, ProviderError> {
        Ok(Self::canned_answer(question))
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_question_verbatim() {
        let answer = MockProvider::new().answer("How are you?").await.unwrap();
        assert_eq!(answer, "[mocked answer] You asked: \"How are you?\"");
    }

    #[tokio::test]
    async fn keeps_inner_quotes_and_unicode() {
        let answer = MockProvider::new().answer("Is \"ß\" a letter?").await.unwrap();
        assert_eq!(answer, "[mocked answer] You asked: \"Is \"ß\" a letter?\"");
    }
}
