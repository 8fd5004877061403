use super::{RoleContext, RoleProfile};
use crate::action_node::tutorial::{CONTENT_KEY, LANGUAGE_KEY, TOPIC_KEY};
use crate::action_node::{ActionOutput, FillOptions};
use crate::actions::{
    Action, UnderstandRequirement, WriteContent, WriteDirectory, extract_directory,
};
use crate::llm::provider::LLMProvider;
use crate::schema::{ActionKind, Memory, Message};
use crate::tutorial::TutorialDocument;
use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

/// Result of a full run
#[derive(Debug, Clone)]
pub struct TutorialReport {
    /// The last message the role produced
    pub message: Option<Message>,
    pub document: TutorialDocument,
}

/// Writes a tutorial: understand the request, outline it, then fill each section
pub struct TutorialAssistant {
    profile: RoleProfile,
    llm: Box<dyn LLMProvider>,
    options: FillOptions,
    rc: RoleContext,
    document: TutorialDocument,
}

fn initial_actions() -> Vec<Box<dyn Action>> {
    vec![
        Box::new(UnderstandRequirement::new()),
        Box::new(WriteDirectory::new()),
    ]
}

impl TutorialAssistant {
    /// The profile's system prompt is used unless `options` already carries one
    pub fn new(profile: RoleProfile, llm: Box<dyn LLMProvider>, mut options: FillOptions) -> Self {
        if options.system_prompt.is_none() {
            options.system_prompt = Some(profile.system_prompt());
        }
        Self {
            profile,
            llm,
            options,
            rc: RoleContext::new(initial_actions()),
            document: TutorialDocument::default(),
        }
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn memory(&self) -> &Memory {
        &self.rc.memory
    }

    pub fn context(&self) -> &RoleContext {
        &self.rc
    }

    pub fn document(&self) -> &TutorialDocument {
        &self.document
    }

    /// Forget any previous run and record `request` as the first message
    fn start(&mut self, request: &str) {
        self.rc = RoleContext::new(initial_actions());
        self.document = TutorialDocument::new(request.trim());
        self.rc.memory.add(Message::user_requirement(request));
        info!(role = %self.profile.name, request, "tutorial requested");
    }

    /// Run every action in order and return the assembled tutorial
    pub async fn run(&mut self, request: &str) -> Result<TutorialReport> {
        self.start(request);

        let mut last = None;
        while self.rc.todo().is_some() {
            last = self.act().await?;
        }

        Ok(TutorialReport {
            message: last,
            document: self.document.clone(),
        })
    }

    /// Stop once the directory is known, before any content is written
    pub async fn outline(&mut self, request: &str) -> Result<TutorialDocument> {
        self.start(request);

        while let Some(kind) = self.rc.todo().map(|todo| todo.kind()) {
            if kind == ActionKind::WriteContent {
                break;
            }
            self.act().await?;
        }

        Ok(self.document.clone())
    }

    /// Run the current todo once; `None` when nothing is left to do
    pub async fn act(&mut self) -> Result<Option<Message>> {
        let Some(index) = self.rc.state else {
            return Ok(None);
        };
        let todo = self
            .rc
            .actions
            .get(index)
            .ok_or_else(|| anyhow!("role state {index} has no action"))?;
        let kind = todo.kind();
        let section = todo.section().map(str::to_string);

        info!(
            role = %self.profile.name,
            action = todo.name(),
            section = section.as_deref(),
            "running action"
        );
        let output = todo
            .run(self.rc.memory.history(), self.llm.as_ref(), &self.options)
            .await
            .with_context(|| format!("Action '{}' failed", todo.name()))?;

        match kind {
            ActionKind::UnderstandRequirement => {
                self.record_requirement(&output);
                self.rc.advance();
            }
            ActionKind::WriteDirectory => self.plan_sections(&output),
            ActionKind::WriteContent => {
                let title = section.unwrap_or_default();
                let content = output
                    .field_text(CONTENT_KEY)
                    .unwrap_or_else(|| output.content.clone());
                self.document.push_section(title, content);
                self.rc.advance();
            }
            ActionKind::UserRequirement => self.rc.advance(),
        }

        let message = Message::from_action(
            output.content,
            Some(output.instruct_content),
            self.profile.profile.clone(),
            kind,
            self.profile.name.clone(),
        );
        self.rc.memory.add(message.clone());
        Ok(Some(message))
    }

    fn record_requirement(&mut self, output: &ActionOutput) {
        let field = |key: &str| {
            output
                .field_text(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(language) = field(LANGUAGE_KEY) {
            self.document.language = Some(language);
        }
        if let Some(topic) = field(TOPIC_KEY) {
            self.document.title = topic;
        }
        info!(
            language = self.document.language.as_deref(),
            topic = %self.document.title,
            "requirement understood"
        );
    }

    /// One content action per directory entry replaces the action list
    fn plan_sections(&mut self, output: &ActionOutput) {
        let directories = extract_directory(&output.content);
        if directories.is_empty() {
            warn!("no directory entries found in model output; tutorial has no sections");
        }

        let mut actions: Vec<Box<dyn Action>> = Vec::with_capacity(directories.len());
        for directory in &directories {
            info!("{directory}");
            actions.push(Box::new(WriteContent::new(directory.clone())));
        }

        self.document.directory = directories;
        self.rc.set_actions(actions);
    }
}
