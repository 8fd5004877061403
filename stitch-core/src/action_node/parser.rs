//! Parsing of action-node replies.
//!
//! Models are asked to wrap a JSON object in `[CONTENT]...[/CONTENT]`. The
//! parser accepts that form, a fenced ```json block, or a bare object, and
//! then checks every expected key against its declared type.

use super::{ActionNode, ExpectedType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static CONTENT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[CONTENT\](.*?)\[/CONTENT\]").expect("content block pattern is valid")
});
static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced json pattern is valid")
});
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("bracket list pattern is valid"));

#[derive(Debug, thiserror::Error)]
pub enum NodeParseError {
    #[error("no [CONTENT] block or JSON object found in model output")]
    MissingBlock,
    #[error("invalid JSON in model output: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model output is not a JSON object")]
    NotAnObject,
    #[error("missing key '{0}' in model output")]
    MissingKey(String),
    #[error("key '{key}' expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },
}

/// Text between the first `[CONTENT]` and `[/CONTENT]` tags, trimmed
pub fn content_block(raw: &str) -> Option<&str> {
    CONTENT_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Best-effort location of the JSON payload in a model reply
pub fn extract_json_block(raw: &str) -> Option<&str> {
    if let Some(block) = content_block(raw) {
        return Some(strip_code_fence(block));
    }

    if let Some(m) = FENCED_JSON.captures(raw).and_then(|caps| caps.get(1)) {
        return Some(m.as_str());
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Body of a ```-fenced block; other text is returned unchanged
pub fn strip_code_fence(block: &str) -> &str {
    let Some(rest) = block.strip_prefix("```") else {
        return block;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Items of the first `[a, b, c]` list in `text`, split on `", "`.
///
/// Items are trimmed, surrounding quotes removed, and empty items dropped.
pub fn split_bracket_list(text: &str) -> Option<Vec<String>> {
    let inner = BRACKETED.captures(text)?.get(1)?.as_str();
    Some(
        inner
            .split(", ")
            .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Parse a model reply into the fields of `leaves`.
///
/// Only the leaf keys are kept. `StrList`, `Int` and `Bool` values given as
/// strings are normalised to their JSON type.
pub fn parse_output(raw: &str, leaves: &[&ActionNode]) -> Result<Map<String, Value>, NodeParseError> {
    let block = extract_json_block(raw).ok_or(NodeParseError::MissingBlock)?;
    let value: Value = serde_json::from_str(block)?;
    let Value::Object(mut object) = value else {
        return Err(NodeParseError::NotAnObject);
    };

    let mut parsed = Map::new();
    for leaf in leaves {
        let value = object
            .remove(&leaf.key)
            .ok_or_else(|| NodeParseError::MissingKey(leaf.key.clone()))?;
        parsed.insert(leaf.key.clone(), coerce(&leaf.key, leaf.expected_type, value)?);
    }
    Ok(parsed)
}

fn coerce(key: &str, expected: ExpectedType, value: Value) -> Result<Value, NodeParseError> {
    let mismatch = |found: &Value| NodeParseError::TypeMismatch {
        key: key.to_string(),
        expected: expected.as_str(),
        found: type_name(found).to_string(),
    };

    match expected {
        ExpectedType::Str => match &value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(value),
            Value::Array(items) if items.iter().all(is_scalar) => Ok(value),
            other => Err(mismatch(other)),
        },
        ExpectedType::StrList => match value {
            Value::Array(items) if items.iter().all(Value::is_string) => Ok(Value::Array(items)),
            Value::String(ref text) => split_bracket_list(text)
                .map(|items| Value::Array(items.into_iter().map(Value::String).collect()))
                .ok_or_else(|| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        ExpectedType::Int => match value {
            Value::Number(ref n) if n.is_i64() || n.is_u64() => Ok(value),
            Value::String(ref text) => text
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
        ExpectedType::Bool => match value {
            Value::Bool(_) => Ok(value),
            Value::String(ref text) => text
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| mismatch(&value)),
            other => Err(mismatch(&other)),
        },
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
