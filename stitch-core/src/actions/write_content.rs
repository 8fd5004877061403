use super::Action;
use crate::action_node::{ActionNode, ActionOutput, FillOptions, tutorial};
use crate::llm::provider::LLMProvider;
use crate::schema::{ActionKind, Message, format_history};
use anyhow::Result;
use async_trait::async_trait;

/// Write the body of one directory entry
pub struct WriteContent {
    directory: String,
    node: ActionNode,
}

impl WriteContent {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            node: tutorial::write_content(),
        }
    }

    /// The section title this action writes
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// History followed by the section title
    pub fn context(&self, history: &[Message]) -> String {
        format!("{}\n{}", format_history(history), self.directory)
    }
}

#[async_trait]
impl Action for WriteContent {
    fn name(&self) -> &str {
        tutorial::WRITE_CONTENT
    }

    fn kind(&self) -> ActionKind {
        ActionKind::WriteContent
    }

    fn section(&self) -> Option<&str> {
        Some(&self.directory)
    }

    async fn run(
        &self,
        history: &[Message],
        llm: &dyn LLMProvider,
        options: &FillOptions,
    ) -> Result<ActionOutput> {
        self.node.fill(&self.context(history), llm, options).await
    }
}
