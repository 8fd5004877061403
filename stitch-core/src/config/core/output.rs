use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where finished tutorials are written
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Save the assembled tutorial as Markdown
    #[serde(default = "default_save")]
    pub save: bool,

    /// Root directory for tutorials; relative paths resolve against the workspace
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save: default_save(),
            directory: default_directory(),
        }
    }
}

fn default_save() -> bool {
    true
}
fn default_directory() -> PathBuf {
    PathBuf::from(defaults::TUTORIAL_OUTPUT_DIR)
}
