use crate::config::constants::role;
use serde::{Deserialize, Serialize};

/// Persona of the tutorial assistant
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoleConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(default = "default_goal")]
    pub goal: String,

    #[serde(default = "default_constraints")]
    pub constraints: String,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            profile: default_profile(),
            goal: default_goal(),
            constraints: default_constraints(),
        }
    }
}

fn default_name() -> String {
    role::NAME.to_string()
}
fn default_profile() -> String {
    role::PROFILE.to_string()
}
fn default_goal() -> String {
    role::GOAL.to_string()
}
fn default_constraints() -> String {
    role::CONSTRAINTS.to_string()
}
