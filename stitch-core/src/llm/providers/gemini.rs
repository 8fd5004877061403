use crate::config::constants::{models, urls};
use crate::llm::error_display;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, MessageRole, Usage,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

pub struct GeminiProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::google::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::GEMINI_API_BASE.to_string(),
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
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let gemini_request = convert_to_gemini_format(&request);

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                let formatted_error =
                    error_display::format_llm_error("Gemini", &format!("Network error: {e}"));
                LLMError::Network(formatted_error)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            if error_text.contains("quota") {
                return Err(LLMError::RateLimit);
            }
            return Err(LLMError::from_status("Gemini", status, &error_text));
        }

        let gemini_response: Value = response.json().await.map_err(|e| {
            let formatted_error = error_display::format_llm_error(
                "Gemini",
                &format!("Failed to parse response: {e}"),
            );
            LLMError::Provider(formatted_error)
        })?;

        convert_from_gemini_format(gemini_response)
    }

    fn supported_models(&self) -> Vec<String> {
        models::google::SUPPORTED_MODELS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

fn convert_to_gemini_format(request: &LLMRequest) -> Value {
    let contents: Vec<Value> = request
        .messages
        .iter()
        .filter(|message| message.role != MessageRole::System && !message.content.is_empty())
        .map(|message| {
            json!({
                "role": message.role.as_gemini_str(),
                "parts": [{"text": message.content}]
            })
        })
        .collect();

    let mut gemini_request = json!({ "contents": contents });

    let system_text: Vec<&str> = request
        .system_prompt
        .iter()
        .map(String::as_str)
        .chain(
            request
                .messages
                .iter()
                .filter(|m| m.role == MessageRole::System)
                .map(|m| m.content.as_str()),
        )
        .collect();
    if !system_text.is_empty() {
        gemini_request["systemInstruction"] = json!({
            "parts": [{"text": system_text.join("\n\n")}]
        });
    }

    let mut generation_config = serde_json::Map::new();
    if let Some(max_tokens) = request.max_tokens {
        generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
    }
    if let Some(temperature) = request.temperature {
        generation_config.insert("temperature".to_string(), json!(temperature));
    }
    if !generation_config.is_empty() {
        gemini_request["generationConfig"] = Value::Object(generation_config);
    }

    gemini_request
}

fn convert_from_gemini_format(response: Value) -> Result<LLMResponse, LLMError> {
    let candidate = response["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| {
            let formatted_error =
                error_display::format_llm_error("Gemini", "No candidates in response");
            LLMError::Provider(formatted_error)
        })?;

    let text_content: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect()
        })
        .unwrap_or_default();

    let finish_reason = match candidate["finishReason"].as_str() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("RECITATION") => FinishReason::ContentFilter,
        Some(other) => FinishReason::Error(other.to_string()),
    };

    let usage = response.get("usageMetadata").map(|u| {
        let count = |field: &str| u.get(field).and_then(|v| v.as_u64()).unwrap_or(0) as u32;
        Usage {
            prompt_tokens: count("promptTokenCount"),
            completion_tokens: count("candidatesTokenCount"),
            total_tokens: count("totalTokenCount"),
        }
    });

    Ok(LLMResponse {
        content: if text_content.is_empty() {
            None
        } else {
            Some(text_content)
        },
        usage,
        finish_reason,
    })
}
