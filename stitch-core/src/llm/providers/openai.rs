use crate::config::constants::{message_roles, model_helpers, models, urls};
use crate::llm::error_display;
use crate::llm::provider::{FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Usage};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

/// OpenAI chat completions; also serves OpenAI-compatible gateways via `base_url`
pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::openai::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::OPENAI_API_BASE.to_string(),
            model,
        }
    }

    pub fn from_config(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let api_key_value = api_key.unwrap_or_default();
        let mut provider = match model {
            Some(model_value) => Self::with_model(api_key_value, model_value),
            None => Self::new(api_key_value),
        };
        if let Some(base) = base_url {
            provider.base_url = base.trim_end_matches('/').to_string();
        }
        provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let openai_request = convert_to_openai_format(&request);

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                let formatted_error =
                    error_display::format_llm_error("OpenAI", &format!("Network error: {e}"));
                LLMError::Network(formatted_error)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::from_status("OpenAI", status, &error_text));
        }

        let openai_response: Value = response.json().await.map_err(|e| {
            let formatted_error = error_display::format_llm_error(
                "OpenAI",
                &format!("Failed to parse response: {e}"),
            );
            LLMError::Provider(formatted_error)
        })?;

        parse_openai_response(openai_response)
    }

    fn supported_models(&self) -> Vec<String> {
        models::openai::SUPPORTED_MODELS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

fn convert_to_openai_format(request: &LLMRequest) -> Value {
    let mut messages = Vec::new();

    if let Some(system_prompt) = &request.system_prompt {
        messages.push(json!({
            "role": message_roles::SYSTEM,
            "content": system_prompt
        }));
    }

    for msg in &request.messages {
        messages.push(json!({
            "role": msg.role.as_openai_str(),
            "content": msg.content
        }));
    }

    let mut openai_request = json!({
        "model": request.model,
        "messages": messages,
        "stream": false
    });

    // Reasoning models reject `max_tokens` and any non-default temperature
    let reasoning = model_helpers::is_openai_reasoning(&request.model);

    if let Some(max_tokens) = request.max_tokens {
        let field = if reasoning {
            "max_completion_tokens"
        } else {
            "max_tokens"
        };
        openai_request[field] = json!(max_tokens);
    }

    if let Some(temperature) = request.temperature {
        if !reasoning {
            openai_request["temperature"] = json!(temperature);
        }
    }

    openai_request
}

fn parse_openai_response(response_json: Value) -> Result<LLMResponse, LLMError> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| {
            LLMError::Provider("Invalid response format: missing choices".to_string())
        })?;

    let choice = choices
        .first()
        .ok_or_else(|| LLMError::Provider("No choices in response".to_string()))?;

    let message = choice.get("message").ok_or_else(|| {
        LLMError::Provider("Invalid response format: missing message".to_string())
    })?;

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string());

    let finish_reason = choice
        .get("finish_reason")
        .and_then(|fr| fr.as_str())
        .map(|fr| match fr {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            _ => FinishReason::Error(fr.to_string()),
        })
        .unwrap_or(FinishReason::Stop);

    let usage = response_json.get("usage").map(|u| Usage {
        prompt_tokens: token_count(u, "prompt_tokens"),
        completion_tokens: token_count(u, "completion_tokens"),
        total_tokens: token_count(u, "total_tokens"),
    });

    Ok(LLMResponse {
        content,
        usage,
        finish_reason,
    })
}

fn token_count(usage: &Value, field: &str) -> u32 {
    usage.get(field).and_then(|v| v.as_u64()).unwrap_or(0) as u32
}
