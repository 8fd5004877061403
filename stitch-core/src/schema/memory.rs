use super::message::{ActionKind, Message};

/// Ordered, append-only message history of a role
#[derive(Debug, Clone, Default)]
pub struct Memory {
    storage: Vec<Message>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: Message) {
        self.storage.push(message);
    }

    /// All messages, oldest first
    pub fn history(&self) -> &[Message] {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Most recent message produced by `cause`
    pub fn latest_by(&self, cause: ActionKind) -> Option<&Message> {
        self.storage.iter().rev().find(|m| m.cause_by == cause)
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }
}

/// Render history as prompt context, newest message first at index 0
pub fn format_history(messages: &[Message]) -> String {
    let mut context = String::from("## History Messages\n");
    let lines: Vec<String> = messages
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, message)| format!("{idx}: {message}"))
        .collect();
    context.push_str(&lines.join("\n"));
    context
}
