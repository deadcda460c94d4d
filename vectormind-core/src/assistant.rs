//! Text-generation strategy for every endpoint.
//!
//! Provides an `Assistant` trait with two implementations:
//! - **OpenAI**: live completions through [`CompletionClient`]
//! - **Mock**: deterministic local output from [`crate::mock`]
//!
//! The implementation is picked once at startup by [`create_assistant`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::completion::{CompletionClient, CompletionError};
use crate::config::ProviderConfig;
use crate::mock;
use crate::prompts::{self, Segment};

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn workflow_plan(
        &self,
        text: &str,
        segment: Option<&str>,
    ) -> Result<String, CompletionError>;

    async fn agent_output(
        &self,
        role: &str,
        task: &str,
        details: &str,
    ) -> Result<String, CompletionError>;

    async fn summarise(&self, text: &str) -> Result<String, CompletionError>;

    async fn generate_email(&self, context: &str, tone: &str) -> Result<String, CompletionError>;

    async fn forecast(&self, data: &[f64], horizon: u32) -> Result<String, CompletionError>;

    async fn sentiment(&self, text: &str) -> Result<String, CompletionError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Live backend when a provider key is configured, mock otherwise.
pub fn create_assistant(config: &ProviderConfig) -> Result<Arc<dyn Assistant>, CompletionError> {
    match CompletionClient::new(config) {
        Ok(client) => Ok(Arc::new(LiveAssistant::new(client))),
        Err(e) if e.is_configuration() => {
            tracing::warn!("No provider API key configured, serving mock responses");
            Ok(Arc::new(MockAssistant))
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// LiveAssistant
// ============================================================================

pub struct LiveAssistant {
    client: CompletionClient,
}

impl LiveAssistant {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Assistant for LiveAssistant {
    async fn workflow_plan(
        &self,
        text: &str,
        segment: Option<&str>,
    ) -> Result<String, CompletionError> {
        let segment = segment.and_then(Segment::parse);
        self.client
            .complete(&prompts::workflow(text, segment.as_ref()))
            .await
    }

    async fn agent_output(
        &self,
        role: &str,
        task: &str,
        details: &str,
    ) -> Result<String, CompletionError> {
        self.client
            .complete(&prompts::agent(role, task, details))
            .await
    }

    async fn summarise(&self, text: &str) -> Result<String, CompletionError> {
        self.client.complete(&prompts::summarise(text)).await
    }

    async fn generate_email(&self, context: &str, tone: &str) -> Result<String, CompletionError> {
        self.client
            .complete(&prompts::generate_email(context, tone))
            .await
    }

    async fn forecast(&self, data: &[f64], horizon: u32) -> Result<String, CompletionError> {
        self.client
            .complete(&prompts::forecast(data, horizon))
            .await
    }

    async fn sentiment(&self, text: &str) -> Result<String, CompletionError> {
        self.client.complete(&prompts::sentiment(text)).await
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ============================================================================
// MockAssistant
// ============================================================================

/// Credential-free backend. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAssistant;

#[async_trait]
impl Assistant for MockAssistant {
    async fn workflow_plan(
        &self,
        text: &str,
        segment: Option<&str>,
    ) -> Result<String, CompletionError> {
        Ok(mock::workflow_plan(text, segment))
    }

    async fn agent_output(
        &self,
        role: &str,
        task: &str,
        details: &str,
    ) -> Result<String, CompletionError> {
        Ok(mock::agent_output(role, task, details))
    }

    async fn summarise(&self, text: &str) -> Result<String, CompletionError> {
        Ok(mock::summary(text))
    }

    async fn generate_email(&self, context: &str, tone: &str) -> Result<String, CompletionError> {
        Ok(mock::email(context, tone))
    }

    async fn forecast(&self, data: &[f64], horizon: u32) -> Result<String, CompletionError> {
        Ok(mock::forecast(data, horizon))
    }

    async fn sentiment(&self, text: &str) -> Result<String, CompletionError> {
        Ok(mock::sentiment(text))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_config(api_key: Option<&str>, base_url: &str) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.map(str::to_string),
            model: "gpt-4o-mini".to_string(),
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        }
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[test]
    fn test_create_assistant_without_key_is_mock() {
        let assistant = create_assistant(&provider_config(None, "http://unused")).unwrap();
        assert_eq!(assistant.name(), "mock");
    }

    #[test]
    fn test_create_assistant_with_key_is_live() {
        let assistant =
            create_assistant(&provider_config(Some("sk-test"), "http://unused")).unwrap();
        assert_eq!(assistant.name(), "openai");
    }

    #[tokio::test]
    async fn test_mock_assistant_matches_mock_functions() {
        let assistant = MockAssistant;
        assert_eq!(
            assistant.summarise("a b c").await.unwrap(),
            mock::summary("a b c")
        );
        assert_eq!(
            assistant.forecast(&[10.0, 20.0, 30.0], 2).await.unwrap(),
            mock::forecast(&[10.0, 20.0, 30.0], 2)
        );
        assert_eq!(
            assistant.sentiment("awful").await.unwrap(),
            mock::sentiment("awful")
        );
    }

    #[tokio::test]
    async fn test_live_workflow_uses_segment_prompt_and_parameters() {
        let mock_server = MockServer::start().await;
        let client = CompletionClient::with_base_url(
            &provider_config(Some("sk-test"), "http://unused"),
            mock_server.uri(),
        )
        .unwrap();
        let assistant = LiveAssistant::new(client);

        let expected = prompts::workflow("Chase unpaid invoices", Some(&Segment::Agency));

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    { "role": "system", "content": expected.system },
                    { "role": "user", "content": "Chase unpaid invoices" }
                ],
                "max_tokens": prompts::WORKFLOW_MAX_TOKENS
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("1. Trigger\n")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let plan = assistant
            .workflow_plan("Chase unpaid invoices", Some("Agency"))
            .await
            .unwrap();
        assert_eq!(plan, "1. Trigger");
    }

    #[tokio::test]
    async fn test_live_assistant_propagates_provider_errors() {
        let mock_server = MockServer::start().await;
        let client = CompletionClient::with_base_url(
            &provider_config(Some("sk-test"), "http://unused"),
            mock_server.uri(),
        )
        .unwrap();
        let assistant = LiveAssistant::new(client);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": { "message": "boom" }
            })))
            .mount(&mock_server)
            .await;

        let err = assistant.sentiment("fine").await.unwrap_err();
        assert!(matches!(err, CompletionError::Api { code: 500, .. }));
    }
}
