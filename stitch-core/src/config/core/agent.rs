use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};

/// Provider and model settings used for every action the role runs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentConfig {
    /// AI provider (openai, anthropic, gemini)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sampling temperature; provider default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Upper bound on tokens generated per action
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Override the provider endpoint (OpenAI-compatible gateways, proxies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// API key fallback when no environment variable is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_model: default_model(),
            temperature: None,
            max_tokens: default_max_tokens(),
            base_url: None,
            api_key_env: None,
            api_key: None,
        }
    }
}

fn default_provider() -> String {
    defaults::DEFAULT_PROVIDER.to_string()
}
fn default_model() -> String {
    defaults::DEFAULT_MODEL.to_string()
}
fn default_max_tokens() -> u32 {
    defaults::DEFAULT_MAX_TOKENS
}
