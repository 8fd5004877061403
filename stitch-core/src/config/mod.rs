//! Stitch Configuration Module
//!
//! Loads `stitch.toml` and exposes the provider, role and output settings.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use api_keys::{ApiKeySources, get_api_key, load_dotenv};
pub use self::core::{AgentConfig, OutputConfig, RoleConfig};
pub use loader::{ConfigManager, StitchConfig};
