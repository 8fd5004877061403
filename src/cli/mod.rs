//! Command-line interface module
//!
//! Argument parsing, the shared provider setup, and one handler per
//! subcommand.

pub mod args;
pub mod config;
pub mod init;
pub mod outline;
pub mod spinner;
pub mod write;

pub use args::{Cli, Commands};
pub use config::handle_config_command;
pub use init::handle_init_command;
pub use outline::handle_outline_command;
pub use write::handle_write_command;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use stitch_core::action_node::FillOptions;
use stitch_core::config::constants::model_helpers;
use stitch_core::config::{ApiKeySources, ConfigManager, StitchConfig, get_api_key};
use stitch_core::llm::{create_provider_with_config, get_factory};
use stitch_core::roles::{RoleProfile, TutorialAssistant};
use tracing::{debug, warn};

/// Load configuration for `workspace` and apply command-line overrides
pub fn load_config(cli: &Cli, workspace: &Path) -> Result<ConfigManager> {
    let mut manager = match cli.config.as_deref() {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load_from_workspace(workspace)?,
    };
    if let Some(path) = manager.config_path() {
        debug!(path = %path.display(), "loaded configuration");
    }
    apply_overrides(manager.config_mut(), cli);
    Ok(manager)
}

fn apply_overrides(config: &mut StitchConfig, cli: &Cli) {
    let agent = &mut config.agent;
    match (&cli.provider, &cli.model) {
        (Some(provider), model) => {
            agent.provider = provider.to_lowercase();
            if let Some(model) = model {
                agent.default_model = model.clone();
            } else if !model_helpers::is_valid(&agent.provider, &agent.default_model) {
                if let Some(default) = model_helpers::default_for(&agent.provider) {
                    agent.default_model = default.to_string();
                }
            }
        }
        (None, Some(model)) => {
            agent.default_model = model.clone();
            let inferred = get_factory()
                .lock()
                .ok()
                .and_then(|factory| factory.provider_from_model(model));
            if let Some(provider) = inferred {
                agent.provider = provider;
            }
        }
        (None, None) => {}
    }

    if let Some(env) = &cli.api_key_env {
        agent.api_key_env = Some(env.clone());
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if cli.no_save {
        config.output.save = false;
    }
}

/// Resolve the output directory against the workspace
pub fn output_root(config: &StitchConfig, workspace: &Path) -> PathBuf {
    if config.output.directory.is_absolute() {
        config.output.directory.clone()
    } else {
        workspace.join(&config.output.directory)
    }
}

/// Build the tutorial assistant described by `config`
pub fn build_assistant(config: &StitchConfig) -> Result<TutorialAssistant> {
    let agent = &config.agent;
    if !model_helpers::is_valid(&agent.provider, &agent.default_model) {
        warn!(
            provider = %agent.provider,
            model = %agent.default_model,
            "model is not in the known list for this provider"
        );
    }

    let sources = ApiKeySources::new(agent.api_key_env.clone(), agent.api_key.clone());
    let api_key = get_api_key(&agent.provider, &sources)?;
    let provider = create_provider_with_config(
        &agent.provider,
        Some(api_key),
        agent.base_url.clone(),
        Some(agent.default_model.clone()),
    )
    .with_context(|| format!("Failed to create provider '{}'", agent.provider))?;

    let options = FillOptions {
        model: agent.default_model.clone(),
        system_prompt: None,
        max_tokens: Some(agent.max_tokens),
        temperature: agent.temperature,
    };

    Ok(TutorialAssistant::new(
        RoleProfile::from(&config.role),
        provider,
        options,
    ))
}
