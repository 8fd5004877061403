use super::Action;
use crate::action_node::parser::{
    content_block, parse_output, split_bracket_list, strip_code_fence,
};
use crate::action_node::{ActionNode, ActionOutput, FillOptions, tutorial};
use crate::llm::provider::LLMProvider;
use crate::schema::{ActionKind, Message, format_history};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::warn;

/// Ask the model for the tutorial's table of contents
pub struct WriteDirectory {
    node: ActionNode,
}

impl WriteDirectory {
    pub fn new() -> Self {
        Self {
            node: tutorial::write_directory(),
        }
    }
}

impl Default for WriteDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for WriteDirectory {
    fn name(&self) -> &str {
        tutorial::WRITE_DIRECTORY
    }

    fn kind(&self) -> ActionKind {
        ActionKind::WriteDirectory
    }

    async fn run(
        &self,
        history: &[Message],
        llm: &dyn LLMProvider,
        options: &FillOptions,
    ) -> Result<ActionOutput> {
        let content = self.node.ask(&format_history(history), llm, options).await?;
        // section titles come from the raw reply; unparseable fields are dropped
        let instruct_content = parse_output(&content, &self.node.leaves()).unwrap_or_else(|err| {
            warn!(node = %self.node.key, error = %err, "directory reply did not parse");
            Map::new()
        });
        Ok(ActionOutput {
            content,
            instruct_content,
        })
    }
}

/// Section titles from a `Write Directory` reply.
///
/// Reads `Directory` from the `[CONTENT]` JSON, either as a bracketed
/// `"[a, b, c]"` string or as a JSON array, with or without a ```json
/// fence inside the tags. Any malformed reply yields an empty list.
pub fn extract_directory(raw: &str) -> Vec<String> {
    let Some(block) = content_block(raw) else {
        return Vec::new();
    };
    let Ok(Value::Object(data)) = serde_json::from_str::<Value>(strip_code_fence(block)) else {
        return Vec::new();
    };

    match data.get(tutorial::DIRECTORY_KEY) {
        Some(Value::String(text)) => split_bracket_list(text.trim()).unwrap_or_default(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|item| {
                item.trim()
                    .trim_matches(|c| c == '"' || c == '\'')
                    .trim()
                    .to_string()
            })
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
