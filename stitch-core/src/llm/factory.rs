use super::providers::{AnthropicProvider, GeminiProvider, OpenAIProvider};
use crate::config::constants::providers;
use crate::llm::provider::{LLMError, LLMProvider};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

type ProviderConstructor = Box<dyn Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync>;

/// LLM provider factory and registry
pub struct LLMFactory {
    providers: HashMap<String, ProviderConstructor>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl LLMFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            providers: HashMap::new(),
        };

        factory.register_provider(providers::OPENAI, |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
            } = config;
            Box::new(OpenAIProvider::from_config(api_key, model, base_url)) as Box<dyn LLMProvider>
        });

        factory.register_provider(providers::ANTHROPIC, |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
            } = config;
            Box::new(AnthropicProvider::from_config(api_key, model, base_url))
                as Box<dyn LLMProvider>
        });

        factory.register_provider(providers::GEMINI, |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
            } = config;
            Box::new(GeminiProvider::from_config(api_key, model, base_url)) as Box<dyn LLMProvider>
        });

        factory
    }

    /// Register a new provider
    pub fn register_provider<F>(&mut self, name: &str, factory_fn: F)
    where
        F: Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync + 'static,
    {
        self.providers
            .insert(name.to_string(), Box::new(factory_fn));
    }

    /// Create provider instance
    pub fn create_provider(
        &self,
        provider_name: &str,
        config: ProviderConfig,
    ) -> Result<Box<dyn LLMProvider>, LLMError> {
        let factory_fn = self.providers.get(provider_name).ok_or_else(|| {
            LLMError::InvalidRequest(format!("Unknown provider: {provider_name}"))
        })?;

        Ok(factory_fn(config))
    }

    /// List available providers, sorted
    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Determine provider name from model string
    pub fn provider_from_model(&self, model: &str) -> Option<String> {
        let m = model.to_lowercase();
        if m.starts_with("gpt-") || m.starts_with("o1") || m.starts_with("o3") {
            Some(providers::OPENAI.to_string())
        } else if m.starts_with("claude-") {
            Some(providers::ANTHROPIC.to_string())
        } else if m.contains("gemini") {
            Some(providers::GEMINI.to_string())
        } else {
            None
        }
    }
}

impl Default for LLMFactory {
    fn default() -> Self {
        Self::new()
    }
}

static FACTORY: LazyLock<Mutex<LLMFactory>> = LazyLock::new(|| Mutex::new(LLMFactory::new()));

/// Get global factory instance
pub fn get_factory() -> &'static Mutex<LLMFactory> {
    &FACTORY
}

fn lock_factory() -> Result<std::sync::MutexGuard<'static, LLMFactory>, LLMError> {
    get_factory()
        .lock()
        .map_err(|_| LLMError::Provider("LLM factory lock poisoned".to_string()))
}

/// Create provider with full configuration
pub fn create_provider_with_config(
    provider_name: &str,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    let config = ProviderConfig {
        api_key,
        base_url,
        model,
    };

    lock_factory()?.create_provider(&provider_name.to_lowercase(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_providers_are_registered() {
        let factory = LLMFactory::new();
        assert_eq!(
            factory.list_providers(),
            vec!["anthropic", "gemini", "openai"]
        );
    }

    #[test]
    fn provider_inferred_from_model_prefix() {
        let factory = LLMFactory::new();
        assert_eq!(factory.provider_from_model("gpt-5-mini").as_deref(), Some("openai"));
        assert_eq!(
            factory.provider_from_model("claude-sonnet-4-20250514").as_deref(),
            Some("anthropic")
        );
        assert_eq!(
            factory.provider_from_model("gemini-2.5-pro").as_deref(),
            Some("gemini")
        );
        assert_eq!(factory.provider_from_model("llama3"), None);
    }

    #[test]
    fn unknown_provider_is_invalid_request() {
        let result = create_provider_with_config("mystery", None, None, None);
        assert!(matches!(result, Err(LLMError::InvalidRequest(_))));
    }

    #[test]
    fn created_provider_reports_its_name() {
        let provider =
            create_provider_with_config("Gemini", Some("key".to_string()), None, None).unwrap();
        assert_eq!(provider.name(), "gemini");
    }
}
