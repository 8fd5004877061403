use crate::config::constants::{defaults, models, urls};
use crate::llm::error_display;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, MessageRole, Usage,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

pub struct AnthropicProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::anthropic::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::ANTHROPIC_API_BASE.to_string(),
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
impl LLMProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let anthropic_request = convert_to_anthropic_format(&request)?;
        let url = format!("{}/messages", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", urls::ANTHROPIC_API_VERSION)
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                let formatted_error =
                    error_display::format_llm_error("Anthropic", &format!("Network error: {e}"));
                LLMError::Network(formatted_error)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::from_status("Anthropic", status, &error_text));
        }

        let anthropic_response: Value = response.json().await.map_err(|e| {
            let formatted_error = error_display::format_llm_error(
                "Anthropic",
                &format!("Failed to parse response: {e}"),
            );
            LLMError::Provider(formatted_error)
        })?;

        parse_anthropic_response(anthropic_response)
    }

    fn supported_models(&self) -> Vec<String> {
        models::anthropic::SUPPORTED_MODELS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

fn convert_to_anthropic_format(request: &LLMRequest) -> Result<Value, LLMError> {
    let mut messages = Vec::new();
    let mut system_parts: Vec<&str> = request.system_prompt.iter().map(String::as_str).collect();

    for msg in &request.messages {
        if msg.role == MessageRole::System {
            system_parts.push(&msg.content);
            continue;
        }
        if msg.content.is_empty() {
            continue;
        }
        messages.push(json!({
            "role": msg.role.as_anthropic_str(),
            "content": [{"type": "text", "text": msg.content}]
        }));
    }

    if messages.is_empty() {
        let formatted_error = error_display::format_llm_error(
            "Anthropic",
            "No convertible messages for Anthropic request",
        );
        return Err(LLMError::InvalidRequest(formatted_error));
    }

    let mut anthropic_request = json!({
        "model": request.model,
        "messages": messages,
        "max_tokens": request.max_tokens.unwrap_or(defaults::DEFAULT_MAX_TOKENS),
    });

    if !system_parts.is_empty() {
        anthropic_request["system"] = json!(system_parts.join("\n\n"));
    }

    if let Some(temperature) = request.temperature {
        anthropic_request["temperature"] = json!(temperature);
    }

    Ok(anthropic_request)
}

fn parse_anthropic_response(response_json: Value) -> Result<LLMResponse, LLMError> {
    let content = response_json
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| {
            let formatted = error_display::format_llm_error(
                "Anthropic",
                "Invalid response format: missing content",
            );
            LLMError::Provider(formatted)
        })?;

    let text_parts: Vec<&str> = content
        .iter()
        .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
        .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
        .collect();

    let finish_reason = match response_json
        .get("stop_reason")
        .and_then(|sr| sr.as_str())
        .unwrap_or("end_turn")
    {
        "end_turn" | "stop_sequence" => FinishReason::Stop,
        "max_tokens" => FinishReason::Length,
        "refusal" => FinishReason::ContentFilter,
        other => FinishReason::Error(other.to_string()),
    };

    let usage = response_json.get("usage").map(|usage_value| {
        let input = usage_value
            .get("input_tokens")
            .and_then(|it| it.as_u64())
            .unwrap_or(0) as u32;
        let output = usage_value
            .get("output_tokens")
            .and_then(|ot| ot.as_u64())
            .unwrap_or(0) as u32;
        Usage {
            prompt_tokens: input,
            completion_tokens: output,
            total_tokens: input + output,
        }
    });

    Ok(LLMResponse {
        content: if text_parts.is_empty() {
            None
        } else {
            Some(text_parts.concat())
        },
        usage,
        finish_reason,
    })
}
