pub mod agent;
pub mod output;
pub mod role;

pub use agent::AgentConfig;
pub use output::OutputConfig;
pub use role::RoleConfig;
