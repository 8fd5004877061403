use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// What produced a message: the user's request or one of the role's actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    UserRequirement,
    UnderstandRequirement,
    WriteDirectory,
    WriteContent,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::UserRequirement => "UserRequirement",
            ActionKind::UnderstandRequirement => "UnderstandRequirement",
            ActionKind::WriteDirectory => "WriteDirectory",
            ActionKind::WriteContent => "WriteContent",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the role's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    /// Structured fields parsed from the model output, keyed by node key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruct_content: Option<Map<String, Value>>,
    /// Author profile; `user` for the incoming request
    pub role: String,
    pub cause_by: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_from: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The natural-language request that starts a run
    pub fn user_requirement(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            instruct_content: None,
            role: crate::config::constants::message_roles::USER.to_string(),
            cause_by: ActionKind::UserRequirement,
            sent_from: None,
            created_at: Utc::now(),
        }
    }

    /// Output of an action, authored by the role
    pub fn from_action(
        content: impl Into<String>,
        instruct_content: Option<Map<String, Value>>,
        role: impl Into<String>,
        cause_by: ActionKind,
        sent_from: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            instruct_content,
            role: role.into(),
            cause_by,
            sent_from: Some(sent_from.into()),
            created_at: Utc::now(),
        }
    }

    /// A string field from `instruct_content`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.instruct_content
            .as_ref()
            .and_then(|fields| fields.get(key))
            .and_then(Value::as_str)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.content)
    }
}
