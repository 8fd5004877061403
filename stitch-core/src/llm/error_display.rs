//! Terminal styling for provider errors and warnings.

use console::style;

/// Red error text
pub fn style_llm_error(message: &str) -> String {
    style(message).red().to_string()
}

/// Amber warning text
pub fn style_llm_warning(message: &str) -> String {
    style(message).yellow().to_string()
}

/// Provider name colored by vendor
pub fn style_provider_name(provider: &str) -> String {
    let styled_name = match provider.to_lowercase().as_str() {
        "gemini" => style(provider).blue(),
        "openai" => style(provider).green(),
        "anthropic" => style(provider).magenta(),
        _ => style(provider).cyan(),
    };
    styled_name.to_string()
}

/// `<provider> <error>` with both parts styled
pub fn format_llm_error(provider: &str, error: &str) -> String {
    format!(
        "{} {}",
        style_provider_name(provider),
        style_llm_error(error)
    )
}

/// `<provider> <warning>` with both parts styled
pub fn format_llm_warning(provider: &str, warning: &str) -> String {
    format!(
        "{} {}",
        style_provider_name(provider),
        style_llm_warning(warning)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_error_keeps_both_parts() {
        let result = format_llm_error("gemini", "Connection failed");
        assert!(result.contains("gemini"));
        assert!(result.contains("Connection failed"));
    }

    #[test]
    fn formatted_warning_keeps_both_parts() {
        let result = format_llm_warning("openai", "Empty directory");
        assert!(result.contains("openai"));
        assert!(result.contains("Empty directory"));
    }

    #[test]
    fn unknown_providers_still_render() {
        for provider in ["gemini", "openai", "anthropic", "local"] {
            assert!(style_provider_name(provider).contains(provider));
        }
    }
}
