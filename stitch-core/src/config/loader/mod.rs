use crate::config::constants::defaults;
use crate::config::core::{AgentConfig, OutputConfig, RoleConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for Stitch
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StitchConfig {
    /// Provider and model settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Tutorial assistant persona
    #[serde(default)]
    pub role: RoleConfig,

    /// Tutorial output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl StitchConfig {
    /// Write a default `stitch.toml` into the workspace.
    ///
    /// Returns the names of the files that were created; an existing file is
    /// left alone unless `force` is set.
    pub fn bootstrap_project<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Vec<String>> {
        let workspace = workspace.as_ref();
        let mut created_files = Vec::new();

        let config_path = workspace.join(defaults::CONFIG_FILE_NAME);
        if !config_path.exists() || force {
            Self::create_sample_config(&config_path)?;
            created_files.push(defaults::CONFIG_FILE_NAME.to_string());
        }

        Ok(created_files)
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = StitchConfig::default()
            .to_toml()
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Configuration manager for loading configurations
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: StitchConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Get the user's home directory path
    fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(userprofile));
        }

        dirs::home_dir()
    }

    /// Candidate config files for a workspace, highest priority first
    pub fn search_paths(workspace: impl AsRef<Path>) -> Vec<PathBuf> {
        let workspace = workspace.as_ref();
        let mut paths = vec![
            workspace.join(defaults::CONFIG_FILE_NAME),
            workspace
                .join(defaults::CONFIG_DIR_NAME)
                .join(defaults::CONFIG_FILE_NAME),
        ];
        if let Some(home_dir) = Self::get_home_dir() {
            paths.push(
                home_dir
                    .join(defaults::CONFIG_DIR_NAME)
                    .join(defaults::CONFIG_FILE_NAME),
            );
        }
        paths
    }

    /// Load configuration from a specific workspace, falling back to defaults
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        for candidate in Self::search_paths(workspace) {
            if candidate.exists() {
                return Self::load_from_file(&candidate);
            }
        }

        Ok(Self {
            config: StitchConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: StitchConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    /// Mutable access for command-line overrides
    pub fn config_mut(&mut self) -> &mut StitchConfig {
        &mut self.config
    }

    /// Take ownership of the configuration
    pub fn into_config(self) -> StitchConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let rendered = StitchConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[agent]"));
        assert!(rendered.contains("[role]"));
        assert!(rendered.contains("[output]"));
        assert!(!rendered.contains("api_key"));

        let parsed: StitchConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.role, RoleConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let parsed: StitchConfig = toml::from_str(
            r#"
            [agent]
            provider = "anthropic"

            [role]
            name = "Quill"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.agent.provider, "anthropic");
        assert_eq!(parsed.agent.max_tokens, defaults::DEFAULT_MAX_TOKENS);
        assert_eq!(parsed.role.name, "Quill");
        assert_eq!(parsed.role.profile, "Tutorial Assistant");
        assert!(parsed.output.save);
    }
}
