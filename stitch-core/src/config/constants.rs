/// Model ID constants for the providers Stitch talks to
pub mod models {
    // Google/Gemini models
    pub mod google {
        pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
        pub const SUPPORTED_MODELS: &[&str] = &[
            "gemini-2.5-flash",
            "gemini-2.5-pro",
            "gemini-2.5-flash-lite",
        ];

        pub const GEMINI_2_5_FLASH: &str = "gemini-2.5-flash";
        pub const GEMINI_2_5_PRO: &str = "gemini-2.5-pro";
        pub const GEMINI_2_5_FLASH_LITE: &str = "gemini-2.5-flash-lite";
    }

    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-5-mini";
        pub const SUPPORTED_MODELS: &[&str] = &["gpt-5", "gpt-5-mini", "gpt-5-nano", "gpt-4.1"];

        /// Models that only accept the reasoning parameter set
        /// (`max_completion_tokens`, default temperature)
        pub const REASONING_MODELS: &[&str] = &[GPT_5, GPT_5_MINI, GPT_5_NANO];

        /// o-series families, matched by prefix (`o3-mini`, `o4-mini-2025-04-16`)
        pub const REASONING_PREFIXES: &[&str] = &["o1", "o3", "o4"];

        pub const GPT_5: &str = "gpt-5";
        pub const GPT_5_MINI: &str = "gpt-5-mini";
        pub const GPT_5_NANO: &str = "gpt-5-nano";
        pub const GPT_4_1: &str = "gpt-4.1";
    }

    pub mod anthropic {
        pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
        pub const SUPPORTED_MODELS: &[&str] =
            &["claude-opus-4-1-20250805", "claude-sonnet-4-20250514"];

        pub const CLAUDE_OPUS_4_1_20250805: &str = "claude-opus-4-1-20250805";
        pub const CLAUDE_SONNET_4_20250514: &str = "claude-sonnet-4-20250514";
    }
}

/// Provider name constants
pub mod providers {
    pub const OPENAI: &str = "openai";
    pub const ANTHROPIC: &str = "anthropic";
    pub const GEMINI: &str = "gemini";
}

pub mod model_helpers {
    use super::models;

    /// Get supported models for a provider
    pub fn supported_for(provider: &str) -> Option<&'static [&'static str]> {
        match provider {
            "google" | "gemini" => Some(models::google::SUPPORTED_MODELS),
            "openai" => Some(models::openai::SUPPORTED_MODELS),
            "anthropic" => Some(models::anthropic::SUPPORTED_MODELS),
            _ => None,
        }
    }

    /// Get default model for a provider
    pub fn default_for(provider: &str) -> Option<&'static str> {
        match provider {
            "google" | "gemini" => Some(models::google::DEFAULT_MODEL),
            "openai" => Some(models::openai::DEFAULT_MODEL),
            "anthropic" => Some(models::anthropic::DEFAULT_MODEL),
            _ => None,
        }
    }

    /// Validate if a model is supported by a provider
    pub fn is_valid(provider: &str, model: &str) -> bool {
        supported_for(provider)
            .map(|list| list.iter().any(|m| *m == model))
            .unwrap_or(false)
    }

    /// Whether an OpenAI model needs the reasoning parameter set
    pub fn is_openai_reasoning(model: &str) -> bool {
        let model = model.to_lowercase();
        models::openai::REASONING_MODELS
            .iter()
            .chain(models::openai::REASONING_PREFIXES)
            .any(|m| model == *m || model.starts_with(&format!("{m}-")))
    }
}

/// Default configuration values
pub mod defaults {
    use super::{models, providers};

    pub const DEFAULT_PROVIDER: &str = providers::OPENAI;
    pub const DEFAULT_MODEL: &str = models::openai::DEFAULT_MODEL;
    pub const DEFAULT_MAX_TOKENS: u32 = 4_096;
    pub const CONFIG_FILE_NAME: &str = "stitch.toml";
    pub const CONFIG_DIR_NAME: &str = ".stitch";
    pub const TUTORIAL_OUTPUT_DIR: &str = "data/tutorial_docx";
}

/// Role defaults for the tutorial assistant
pub mod role {
    pub const NAME: &str = "Stitch";
    pub const PROFILE: &str = "Tutorial Assistant";
    pub const GOAL: &str = "Generate tutorial documents";
    pub const CONSTRAINTS: &str =
        "Strictly follow Markdown's syntax, with neat and standardized layout";
}

pub mod message_roles {
    pub const SYSTEM: &str = "system";
    pub const USER: &str = "user";
}

/// Environment variables consulted for API keys
pub mod env_vars {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
}

/// URL constants for API endpoints
pub mod urls {
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
    pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
}
