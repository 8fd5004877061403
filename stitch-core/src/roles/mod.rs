//! Roles sequence actions against a shared memory.

pub mod tutorial_assistant;

pub use tutorial_assistant::{TutorialAssistant, TutorialReport};

use crate::actions::Action;
use crate::config::RoleConfig;
use crate::config::constants::role;
use crate::schema::Memory;

/// Who the role is, rendered into the system prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleProfile {
    pub name: String,
    pub profile: String,
    pub goal: String,
    pub constraints: String,
}

impl Default for RoleProfile {
    fn default() -> Self {
        Self {
            name: role::NAME.to_string(),
            profile: role::PROFILE.to_string(),
            goal: role::GOAL.to_string(),
            constraints: role::CONSTRAINTS.to_string(),
        }
    }
}

impl From<&RoleConfig> for RoleProfile {
    fn from(config: &RoleConfig) -> Self {
        Self {
            name: config.name.clone(),
            profile: config.profile.clone(),
            goal: config.goal.clone(),
            constraints: config.constraints.clone(),
        }
    }
}

impl RoleProfile {
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are {}, a {}", self.name, self.profile);
        if !self.goal.is_empty() {
            prompt.push_str(&format!(", your goal is {}", self.goal));
        }
        prompt.push('.');
        if !self.constraints.is_empty() {
            prompt.push_str(&format!(" The constraint is {}.", self.constraints));
        }
        prompt
    }
}

/// How the next action is picked; actions always run in declaration order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReactMode {
    #[default]
    ByOrder,
}

/// Runtime state of a role
pub struct RoleContext {
    pub memory: Memory,
    pub actions: Vec<Box<dyn Action>>,
    /// Index of the next action; `None` once every action has run
    pub state: Option<usize>,
    pub react_mode: ReactMode,
}

impl RoleContext {
    pub fn new(actions: Vec<Box<dyn Action>>) -> Self {
        let mut context = Self {
            memory: Memory::new(),
            actions: Vec::new(),
            state: None,
            react_mode: ReactMode::ByOrder,
        };
        context.set_actions(actions);
        context
    }

    /// Replace the action list and point at its first entry
    pub fn set_actions(&mut self, actions: Vec<Box<dyn Action>>) {
        self.state = if actions.is_empty() { None } else { Some(0) };
        self.actions = actions;
    }

    pub fn todo(&self) -> Option<&dyn Action> {
        self.state
            .and_then(|index| self.actions.get(index))
            .map(|action| action.as_ref())
    }

    /// Move to the next action in order
    pub fn advance(&mut self) {
        self.state = match (self.react_mode, self.state) {
            (ReactMode::ByOrder, Some(index)) if index + 1 < self.actions.len() => Some(index + 1),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{UnderstandRequirement, WriteDirectory};
    use crate::schema::ActionKind;

    #[test]
    fn system_prompt_names_the_persona() {
        assert_eq!(
            RoleProfile::default().system_prompt(),
            "You are Stitch, a Tutorial Assistant, your goal is Generate tutorial documents. \
             The constraint is Strictly follow Markdown's syntax, with neat and standardized layout."
        );
    }

    #[test]
    fn context_walks_actions_in_order() {
        let mut context = RoleContext::new(vec![
            Box::new(UnderstandRequirement::new()),
            Box::new(WriteDirectory::new()),
        ]);
        assert_eq!(context.todo().map(|a| a.kind()), Some(ActionKind::UnderstandRequirement));
        context.advance();
        assert_eq!(context.todo().map(|a| a.kind()), Some(ActionKind::WriteDirectory));
        context.advance();
        assert!(context.todo().is_none());

        context.set_actions(Vec::new());
        assert_eq!(context.state, None);
    }
}
