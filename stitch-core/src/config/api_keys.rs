//! API key retrieval from environment variables, .env files, and the
//! configuration file.
//!
//! Environment variables win over `.env` values (dotenvy never overrides an
//! already-set variable), and both win over a key stored in `stitch.toml`.

use crate::config::constants::{env_vars, providers};
use anyhow::{Result, anyhow};
use std::env;
use tracing::{debug, warn};

/// Where to look for an API key
#[derive(Debug, Clone, Default)]
pub struct ApiKeySources {
    /// Explicit environment variable name (from `--api-key-env`)
    pub env_override: Option<String>,
    /// API key from configuration file
    pub config_value: Option<String>,
}

impl ApiKeySources {
    pub fn new(env_override: Option<String>, config_value: Option<String>) -> Self {
        Self {
            env_override,
            config_value,
        }
    }
}

/// Load environment variables from a .env file in the current directory.
///
/// A missing file is not an error; an unreadable one is logged and skipped.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment variables");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            warn!(error = %e, "failed to load .env file");
            Ok(())
        }
    }
}

/// Environment variables checked for a provider, in priority order
pub fn env_vars_for(provider: &str) -> &'static [&'static str] {
    match provider.to_lowercase().as_str() {
        providers::GEMINI | "google" => &[env_vars::GEMINI_API_KEY, env_vars::GOOGLE_API_KEY],
        providers::ANTHROPIC => &[env_vars::ANTHROPIC_API_KEY],
        _ => &[env_vars::OPENAI_API_KEY],
    }
}

/// Get the API key for a provider.
///
/// Lookup order:
/// 1. the explicit override variable, when given
/// 2. the provider's conventional variables (`GEMINI_API_KEY` then
///    `GOOGLE_API_KEY` for Gemini)
/// 3. the configuration file value
pub fn get_api_key(provider: &str, sources: &ApiKeySources) -> Result<String> {
    if let Some(name) = sources.env_override.as_deref() {
        if let Some(key) = non_empty_var(name) {
            return Ok(key);
        }
    }

    let inferred = env_vars_for(provider);
    for name in inferred {
        if let Some(key) = non_empty_var(name) {
            return Ok(key);
        }
    }

    if let Some(key) = sources.config_value.as_deref() {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    let wanted = sources
        .env_override
        .as_deref()
        .unwrap_or(inferred[0])
        .to_string();
    Err(anyhow!(
        "No API key found for {provider} provider. Set {wanted} environment variable (or add to .env file) or configure agent.api_key in stitch.toml"
    ))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_variable_wins() {
        unsafe {
            env::set_var("STITCH_TEST_OVERRIDE_KEY", "override-key");
        }

        let sources = ApiKeySources::new(
            Some("STITCH_TEST_OVERRIDE_KEY".to_string()),
            Some("config-key".to_string()),
        );
        let result = get_api_key("anthropic", &sources);
        assert_eq!(result.unwrap(), "override-key");

        unsafe {
            env::remove_var("STITCH_TEST_OVERRIDE_KEY");
        }
    }

    #[test]
    fn test_falls_back_to_config_value() {
        let sources = ApiKeySources::new(
            Some("STITCH_TEST_MISSING_KEY".to_string()),
            Some("config-key".to_string()),
        );
        // Only meaningful when the conventional variable is absent in the
        // test environment.
        if env::var(env_vars::ANTHROPIC_API_KEY).is_err() {
            assert_eq!(get_api_key("anthropic", &sources).unwrap(), "config-key");
        }
    }

    #[test]
    fn test_error_names_the_variable() {
        let sources = ApiKeySources::new(Some("STITCH_TEST_ABSENT_KEY".to_string()), None);
        if env::var(env_vars::ANTHROPIC_API_KEY).is_err() {
            let err = get_api_key("anthropic", &sources).unwrap_err();
            assert!(err.to_string().contains("STITCH_TEST_ABSENT_KEY"));
        }
    }

    #[test]
    fn test_gemini_checks_google_variable() {
        assert_eq!(
            env_vars_for("gemini"),
            &[env_vars::GEMINI_API_KEY, env_vars::GOOGLE_API_KEY]
        );
        assert_eq!(env_vars_for("unknown"), &[env_vars::OPENAI_API_KEY]);
    }
}
