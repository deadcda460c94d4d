//! Completion gateway: a single chat-completion call against an
//! OpenAI-compatible provider.
//!
//! One request per call. Nothing is retried or cached; callers surface
//! provider failures directly.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ProviderConfig;

// ============================================================================
// Error types
// ============================================================================

#[derive(Error, Debug)]
pub enum CompletionError {
    /// No provider credential configured. This is the trigger for mock mode,
    /// not a request failure.
    #[error("Configuration error: no provider API key configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Provider returned no completion choices")]
    EmptyCompletion,
}

impl CompletionError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, CompletionError::MissingApiKey)
    }
}

/// Prompt pair plus the sampling parameters for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

// ============================================================================
// Provider API structs (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
    error: Option<ProviderErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

// ============================================================================
// CompletionClient
// ============================================================================

#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CompletionClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, CompletionError> {
        Self::with_base_url(config, config.base_url.clone())
    }

    /// Create a client against a custom base URL (local test doubles, proxies).
    pub fn with_base_url(
        config: &ProviderConfig,
        base_url: String,
    ) -> Result<Self, CompletionError> {
        let api_key = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(CompletionError::MissingApiKey),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one completion and return the trimmed text of the first choice.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorResponse>(&error_body)
                .ok()
                .and_then(|e| e.error)
                .map(|e| e.message)
                .unwrap_or(error_body);

            tracing::error!(code = status.as_u16(), message = %message, "completion provider error");

            return Err(CompletionError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or(CompletionError::EmptyCompletion)
    }
}

// ============================================================================
// TESTS
// ============================================================================
