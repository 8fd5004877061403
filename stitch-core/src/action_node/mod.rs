//! Declarative prompt nodes.
//!
//! An [`ActionNode`] names one field the model must produce: its key, the
//! expected type, an instruction and an example. Composite nodes group
//! leaves; filling a composite asks the model for all of its leaves in one
//! call and parses the reply into [`ActionOutput::instruct_content`].

pub mod parser;
pub mod tutorial;

use crate::llm::provider::{FinishReason, LLMProvider, LLMRequest, Message};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

pub use parser::{NodeParseError, parse_output};

const CONSTRAINT: &str = "Language: Please use the same language as the user requirement.\nFormat: output wrapped inside [CONTENT][/CONTENT] like format example, nothing else.";
const ACTION: &str =
    "Follow instructions of nodes, generate output and make sure it follows the format example.";

/// Declared output type of a leaf node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    Str,
    StrList,
    Int,
    Bool,
}

impl ExpectedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedType::Str => "str",
            ExpectedType::StrList => "list[str]",
            ExpectedType::Int => "int",
            ExpectedType::Bool => "bool",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionNode {
    pub key: String,
    pub expected_type: ExpectedType,
    pub instruction: String,
    pub example: String,
    pub children: Vec<ActionNode>,
}

/// Raw model text plus the fields parsed out of it
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutput {
    pub content: String,
    pub instruct_content: Map<String, Value>,
}

impl ActionOutput {
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.instruct_content.get(key).and_then(Value::as_str)
    }

    /// A `str` field as text; scalar arrays are joined one item per line
    pub fn field_text(&self, key: &str) -> Option<String> {
        match self.instruct_content.get(key)? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(scalar_text)
                    .collect::<Option<Vec<_>>>()?
                    .join("\n"),
            ),
            value => scalar_text(value),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Model parameters applied to every fill
#[derive(Debug, Clone, PartialEq)]
pub struct FillOptions {
    pub model: String,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl FillOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn request(&self, prompt: String) -> LLMRequest {
        LLMRequest {
            messages: vec![Message::user(prompt)],
            system_prompt: self.system_prompt.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

impl ActionNode {
    pub fn new(
        key: impl Into<String>,
        expected_type: ExpectedType,
        instruction: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            expected_type,
            instruction: instruction.into(),
            example: example.into(),
            children: Vec::new(),
        }
    }

    /// Composite node; a repeated child key replaces the earlier child in place
    pub fn from_children(key: impl Into<String>, children: Vec<ActionNode>) -> Self {
        let mut node = Self::new(key, ExpectedType::Str, "", "");
        for child in children {
            match node.children.iter_mut().find(|c| c.key == child.key) {
                Some(existing) => *existing = child,
                None => node.children.push(child),
            }
        }
        node
    }

    /// Leaf nodes in declaration order; a leaf is its own only leaf
    pub fn leaves(&self) -> Vec<&ActionNode> {
        if self.children.is_empty() {
            return vec![self];
        }
        self.children.iter().flat_map(ActionNode::leaves).collect()
    }

    fn example_value(&self) -> Value {
        let example = dedent(&self.example);
        match self.expected_type {
            ExpectedType::Str => Value::String(example),
            ExpectedType::StrList => parser::split_bracket_list(&example)
                .map(|items| Value::Array(items.into_iter().map(Value::String).collect()))
                .unwrap_or(Value::String(example)),
            ExpectedType::Int => example
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::String(example)),
            ExpectedType::Bool => example
                .parse::<bool>()
                .map(Value::Bool)
                .unwrap_or(Value::String(example)),
        }
    }

    fn format_example(&self) -> String {
        let fields: Map<String, Value> = self
            .leaves()
            .into_iter()
            .map(|leaf| (leaf.key.clone(), leaf.example_value()))
            .collect();
        let json = serde_json::to_string_pretty(&Value::Object(fields))
            .unwrap_or_else(|_| "{}".to_string());
        format!("[CONTENT]\n{json}\n[/CONTENT]")
    }

    fn format_nodes(&self) -> String {
        self.leaves()
            .into_iter()
            .map(|leaf| {
                format!(
                    "- {}: {}  # {}",
                    leaf.key,
                    leaf.expected_type,
                    collapse_whitespace(&leaf.instruction)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the fill prompt for `context`
    pub fn compile(&self, context: &str) -> String {
        format!(
            "## context\n{context}\n\n-----\n\n## format example\n{}\n\n## nodes: \"<node>: <type>  # <instruction>\"\n{}\n\n## constraint\n{CONSTRAINT}\n\n## action\n{ACTION}\n",
            self.format_example(),
            self.format_nodes(),
        )
    }

    /// Send the compiled prompt and return the raw reply text
    pub async fn ask(
        &self,
        context: &str,
        llm: &dyn LLMProvider,
        options: &FillOptions,
    ) -> Result<String> {
        let prompt = self.compile(context);
        debug!(node = %self.key, provider = llm.name(), %prompt, "filling action node");

        let response = llm
            .generate(options.request(prompt))
            .await
            .with_context(|| format!("LLM request failed for node '{}'", self.key))?;

        if response.finish_reason == FinishReason::Length {
            warn!(node = %self.key, "model output truncated at the token limit");
        }
        if let Some(usage) = response.usage {
            debug!(
                node = %self.key,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "token usage"
            );
        }

        Ok(response.content.unwrap_or_default())
    }

    /// Ask the model to fill every leaf of this node
    pub async fn fill(
        &self,
        context: &str,
        llm: &dyn LLMProvider,
        options: &FillOptions,
    ) -> Result<ActionOutput> {
        let content = self.ask(context, llm, options).await?;
        let instruct_content = parse_output(&content, &self.leaves())
            .with_context(|| format!("Failed to parse model output for node '{}'", self.key))?;

        Ok(ActionOutput {
            content,
            instruct_content,
        })
    }
}

/// Strip common leading indentation and surrounding blank lines
fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_blanks(line))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Count of leading ASCII spaces and tabs, which are single bytes
fn leading_blanks(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite() -> ActionNode {
        ActionNode::from_children(
            "Plan",
            vec![
                ActionNode::new("Language", ExpectedType::Str, "Pick a language.", "en_us"),
                ActionNode::new(
                    "Steps",
                    ExpectedType::StrList,
                    "\n        List the steps.\n        Keep them short.\n        ",
                    "[one, two]",
                ),
            ],
        )
    }

    #[test]
    fn repeated_child_keys_keep_the_last() {
        let node = ActionNode::from_children(
            "Plan",
            vec![
                ActionNode::new("A", ExpectedType::Str, "first", ""),
                ActionNode::new("B", ExpectedType::Str, "", ""),
                ActionNode::new("A", ExpectedType::Int, "second", ""),
            ],
        );
        let keys: Vec<&str> = node.leaves().iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(node.children[0].instruction, "second");
    }

    #[test]
    fn compiled_prompt_has_all_sections_in_order() {
        let prompt = composite().compile("## History Messages\n0: user: hi");
        let order = [
            "## context",
            "## History Messages",
            "## format example",
            "## nodes",
            "## constraint",
            "## action",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| prompt.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn nodes_and_examples_are_rendered_per_leaf() {
        let prompt = composite().compile("ctx");
        assert!(prompt.contains("- Language: str  # Pick a language."));
        assert!(prompt.contains("- Steps: list[str]  # List the steps. Keep them short."));
        assert!(prompt.contains("\"Language\": \"en_us\""));
        assert!(prompt.contains("\"one\""));
        assert!(prompt.contains("[CONTENT]\n{"));
    }

    #[test]
    fn dedent_removes_shared_indentation() {
        assert_eq!(dedent("\n    a\n      b\n    "), "a\n  b");
        assert_eq!(dedent(""), "");
    }

    #[test]
    fn dedent_keeps_lines_led_by_wide_spaces() {
        assert_eq!(dedent("  a\n  \u{3000}b"), "a\n\u{3000}b");
    }

    #[test]
    fn field_text_joins_scalar_arrays() {
        let mut fields = Map::new();
        fields.insert(
            "Content".to_string(),
            Value::from(vec!["## Intro", "Git is a VCS"]),
        );
        fields.insert("Depth".to_string(), Value::from(2));
        fields.insert("Nested".to_string(), serde_json::json!([{"a": 1}]));
        let output = ActionOutput {
            content: String::new(),
            instruct_content: fields,
        };
        assert_eq!(
            output.field_text("Content").as_deref(),
            Some("## Intro\nGit is a VCS")
        );
        assert_eq!(output.field_text("Depth").as_deref(), Some("2"));
        assert_eq!(output.field_text("Nested"), None);
        assert_eq!(output.field_text("Missing"), None);
        assert_eq!(output.field_str("Content"), None);
    }
}
