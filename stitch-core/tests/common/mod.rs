#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use stitch_core::llm::provider::{LLMError, LLMProvider, LLMRequest, LLMResponse};

/// Replays canned replies in order and records every request it receives
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<LLMRequest>>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::default();
        for reply in replies {
            provider.push_reply(reply);
        }
        provider
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// User prompt text of each recorded request
    pub fn prompts(&self) -> Vec<String> {
        self.requests().iter().map(LLMRequest::user_text).collect()
    }

    pub fn boxed(&self) -> Box<dyn LLMProvider> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(LLMResponse::text(text)),
            Some(Err(message)) => Err(LLMError::Provider(message)),
            None => Err(LLMError::Provider("script exhausted".to_string())),
        }
    }

    fn supported_models(&self) -> Vec<String> {
        vec!["scripted-model".to_string()]
    }
}

/// Wrap a JSON object in the tags the action nodes expect
pub fn content_reply(json: &str) -> String {
    format!("[CONTENT]\n{json}\n[/CONTENT]")
}
