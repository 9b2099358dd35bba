//! Chat-completions client
//!
//! HTTP client for an OpenAI-compatible `/chat/completions` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::assistant::SYSTEM_PROMPT;

/// Anything that can answer a customer's chat message
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produce the assistant's reply to a single customer message
    async fn reply(&self, message: &str) -> Result<String, AssistantError>;

    /// Longest a single reply may take before the backend gives up itself
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// Configuration for the chat-completions client
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Full URL of the chat-completions endpoint
    pub api_url: String,
    /// Bearer token; the assistant is disabled without one
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Reply length cap
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            request_timeout_ms: 30_000,
        }
    }
}

/// Chat-completions REST client
pub struct OpenAiClient {
    client: Client,
    config: AssistantConfig,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client; fails with `NotConfigured` when no API key is set
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AssistantError::NotConfigured)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(AssistantError::Request)?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    fn build_request(&self, message: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: message.to_string(),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.config.request_timeout_ms))
    }

    async fn reply(&self, message: &str) -> Result<String, AssistantError> {
        let body = self.build_request(message);

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else if e.is_connect() {
                    AssistantError::Unavailable
                } else {
                    AssistantError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AssistantError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(AssistantError::Request)?;

        tracing::debug!(
            model = %self.config.model,
            choices = completion.choices.len(),
            "Assistant reply received"
        );

        completion.into_reply()
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_reply(self) -> Result<String, AssistantError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AssistantError::EmptyReply)
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when asking the assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("assistant is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("request timeout")]
    Timeout,

    #[error("assistant upstream unavailable")]
    Unavailable,

    #[error("empty reply")]
    EmptyReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AssistantConfig {
        AssistantConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 500);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        assert!(matches!(
            OpenAiClient::new(AssistantConfig::default()),
            Err(AssistantError::NotConfigured)
        ));

        let blank = AssistantConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            OpenAiClient::new(blank),
            Err(AssistantError::NotConfigured)
        ));
    }

    #[test]
    fn test_request_body() {
        let client = OpenAiClient::new(configured()).unwrap();
        let body = serde_json::to_value(client.build_request("Какой кэшбэк?")).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Какой кэшбэк?");
    }

    #[test]
    fn test_reports_configured_timeout() {
        let config = AssistantConfig {
            request_timeout_ms: 12_500,
            ..configured()
        };
        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(client.timeout(), Some(Duration::from_millis(12_500)));
    }

    #[test]
    fn test_parse_reply() {
        let raw = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"До 10%."}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_reply().unwrap(), "До 10%.");

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(empty.into_reply(), Err(AssistantError::EmptyReply)));
    }
}
