//! Actions run by the tutorial assistant, one model call each.

pub mod directory;
pub mod write_content;

use crate::action_node::{ActionNode, ActionOutput, FillOptions, tutorial};
use crate::llm::provider::LLMProvider;
use crate::schema::{ActionKind, Message, format_history};
use anyhow::Result;
use async_trait::async_trait;

pub use directory::{WriteDirectory, extract_directory};
pub use write_content::WriteContent;

/// A single step of a role
#[async_trait]
pub trait Action: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Kind recorded as `cause_by` on the resulting message
    fn kind(&self) -> ActionKind;

    /// Directory entry this action writes, if any
    fn section(&self) -> Option<&str> {
        None
    }

    /// Fill the action's node against the role history
    async fn run(
        &self,
        history: &[Message],
        llm: &dyn LLMProvider,
        options: &FillOptions,
    ) -> Result<ActionOutput>;
}

/// Decide the document language and the topic the user wants to learn
pub struct UnderstandRequirement {
    node: ActionNode,
}

impl UnderstandRequirement {
    pub fn new() -> Self {
        Self {
            node: tutorial::understand_requirement(),
        }
    }
}

impl Default for UnderstandRequirement {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for UnderstandRequirement {
    fn name(&self) -> &str {
        tutorial::UNDERSTAND_REQUIREMENT
    }

    fn kind(&self) -> ActionKind {
        ActionKind::UnderstandRequirement
    }

    async fn run(
        &self,
        history: &[Message],
        llm: &dyn LLMProvider,
        options: &FillOptions,
    ) -> Result<ActionOutput> {
        self.node.fill(&format_history(history), llm, options).await
    }
}
