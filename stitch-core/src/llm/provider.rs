//! Universal LLM provider abstraction
//!
//! Every action the tutorial assistant runs is a single-turn completion: one
//! user message carrying the compiled action-node prompt, optionally preceded
//! by a system prompt describing the role. This module holds the request and
//! response shapes shared by all providers and the [`LLMProvider`] trait they
//! implement.
//!
//! ## Message Role Mapping
//!
//! - **OpenAI**: `system`, `user`, `assistant`
//! - **Anthropic**: `user`, `assistant`; system text goes to the top-level
//!   `system` parameter
//! - **Gemini**: `user`, `model`; system text goes to `systemInstruction`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Universal LLM request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LLMRequest {
    /// Single user turn against `model`
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt.into())],
            system_prompt: None,
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Concatenated text of all user messages
    pub fn user_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Universal message structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: String) -> Self {
        Self {
            role: MessageRole::User,
            content,
        }
    }

    /// Create a system message
    pub fn system(content: String) -> Self {
        Self {
            role: MessageRole::System,
            content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Gemini only accepts `user` and `model` in conversation contents
    pub fn as_gemini_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system", // Sent as systemInstruction, not in contents
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    pub fn as_openai_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    pub fn as_anthropic_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system", // Hoisted to the system parameter
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Universal LLM response
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: Option<String>,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

impl LLMResponse {
    /// Plain text response that finished normally
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            usage: None,
            finish_reason: FinishReason::Stop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error(String),
}

/// Universal LLM provider trait
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "openai", "anthropic")
    fn name(&self) -> &str;

    /// Generate completion
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    /// Get supported models
    fn supported_models(&self) -> Vec<String>;

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.messages.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Messages cannot be empty".to_string(),
            ));
        }

        if request.model.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Model cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

impl LLMError {
    /// Map a non-success HTTP status to the matching error variant
    pub fn from_status(provider: &str, status: reqwest::StatusCode, body: &str) -> Self {
        let message = crate::llm::error_display::format_llm_error(
            provider,
            &format!("HTTP {status}: {body}"),
        );
        match status.as_u16() {
            401 | 403 => LLMError::Authentication(message),
            429 => LLMError::RateLimit,
            _ if body.contains("insufficient_quota") || body.contains("rate limit") => {
                LLMError::RateLimit
            }
            _ => LLMError::Provider(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_distinguishes_auth_and_rate_limits() {
        let auth = LLMError::from_status("openai", reqwest::StatusCode::UNAUTHORIZED, "bad key");
        assert!(matches!(auth, LLMError::Authentication(_)));

        let limited = LLMError::from_status("openai", reqwest::StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(limited, LLMError::RateLimit));

        let other =
            LLMError::from_status("openai", reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(other, LLMError::Provider(ref m) if m.contains("boom")));
    }

    #[test]
    fn gemini_names_the_assistant_model() {
        assert_eq!(MessageRole::Assistant.as_gemini_str(), "model");
        assert_eq!(MessageRole::Assistant.as_openai_str(), "assistant");
    }

    #[test]
    fn default_validation_rejects_empty_requests() {
        struct Silent;

        #[async_trait]
        impl LLMProvider for Silent {
            fn name(&self) -> &str {
                "silent"
            }
            async fn generate(&self, _request: LLMRequest) -> Result<LLMResponse, LLMError> {
                Ok(LLMResponse::text(""))
            }
            fn supported_models(&self) -> Vec<String> {
                Vec::new()
            }
        }

        let mut request = LLMRequest::single_turn("", "hello");
        assert!(Silent.validate_request(&request).is_err());
        request.model = "m".to_string();
        assert!(Silent.validate_request(&request).is_ok());
        request.messages.clear();
        assert!(Silent.validate_request(&request).is_err());
    }
}
