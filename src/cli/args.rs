//! CLI argument parsing and configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for stitch
#[derive(Parser, Debug)]
#[command(
    name = "stitch",
    version,
    about = "Tutorial-writing assistant: turns a topic request into a Markdown tutorial"
)]
pub struct Cli {
    /// LLM provider (openai, anthropic, gemini); inferred from --model when omitted
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Model ID, e.g. gpt-5-mini or gemini-2.5-flash
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API key environment variable to read before the provider defaults
    #[arg(long, global = true)]
    pub api_key_env: Option<String>,

    /// Workspace root directory; defaults to current directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory tutorials are saved under
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Print the tutorial without saving it
    #[arg(long, global = true)]
    pub no_save: bool,

    /// Enable debug logging (prompts, token usage)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a complete tutorial for a topic request
    Write {
        /// The request, e.g. "Write a tutorial about Git"
        #[arg(required = true)]
        request: Vec<String>,
    },

    /// Decide language, topic and directory without writing content
    Outline {
        /// The request, e.g. "Write a tutorial about Git"
        #[arg(required = true)]
        request: Vec<String>,
    },

    /// Create stitch.toml in the workspace
    Init {
        /// Overwrite an existing stitch.toml
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_words_are_collected() {
        let cli = Cli::parse_from(["stitch", "write", "a", "Git", "tutorial", "--no-save"]);
        assert!(cli.no_save);
        match cli.command {
            Commands::Write { request } => assert_eq!(request.join(" "), "a Git tutorial"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_apply_to_subcommands() {
        let cli = Cli::parse_from([
            "stitch",
            "outline",
            "Rust",
            "--provider",
            "gemini",
            "--model",
            "gemini-2.5-pro",
        ]);
        assert_eq!(cli.provider.as_deref(), Some("gemini"));
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
        assert!(matches!(cli.command, Commands::Outline { .. }));
    }

    #[test]
    fn write_requires_a_request() {
        assert!(Cli::try_parse_from(["stitch", "write"]).is_err());
    }
}
