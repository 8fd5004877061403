//! # stitch-core - Runtime for Stitch
//!
//! `stitch-core` powers the Stitch tutorial assistant. Given a request such
//! as "write a tutorial about Git", the assistant asks a language model for
//! the document language and topic, then for a table of contents, then for
//! the content of every entry, and assembles the result into Markdown.
//!
//! ## Highlights
//!
//! - **Action Nodes**: declarative prompt units (key, type, instruction,
//!   example) compiled into a single prompt and parsed back from a
//!   `[CONTENT]...[/CONTENT]` JSON block.
//! - **Provider Abstraction**: one `LLMProvider` trait with adapters for
//!   OpenAI (and compatible gateways), Anthropic and Gemini.
//! - **Configuration-First**: provider, persona and output settings come
//!   from `stitch.toml`, with defaults centralized in `config::constants`.
//!
//! ## Architecture Overview
//!
//! - `config/`: configuration loader, defaults and API key lookup.
//! - `llm/`: provider clients, request shaping and response handling.
//! - `action_node/`: prompt nodes, prompt compilation and reply parsing.
//! - `schema/`: messages and the role's memory.
//! - `actions/`: the three tutorial steps.
//! - `roles/`: the tutorial assistant and its run loop.
//! - `tutorial/`: the assembled document and the Markdown writer.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use stitch_core::action_node::FillOptions;
//! use stitch_core::llm::create_provider_with_config;
//! use stitch_core::roles::{RoleProfile, TutorialAssistant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let provider = create_provider_with_config(
//!         "openai",
//!         Some(std::env::var("OPENAI_API_KEY")?),
//!         None,
//!         Some("gpt-5-mini".to_string()),
//!     )?;
//!     let mut assistant = TutorialAssistant::new(
//!         RoleProfile::default(),
//!         provider,
//!         FillOptions::new("gpt-5-mini"),
//!     );
//!     let report = assistant.run("Write a tutorial about Git").await?;
//!     println!("{}", report.document.to_markdown());
//!     Ok(())
//! }
//! ```

pub mod action_node;
pub mod actions;
pub mod config;
pub mod llm;
pub mod roles;
pub mod schema;
pub mod tutorial;

pub use action_node::{ActionNode, ActionOutput, ExpectedType, FillOptions};
pub use actions::{Action, UnderstandRequirement, WriteContent, WriteDirectory, extract_directory};
pub use config::{ConfigManager, StitchConfig};
pub use llm::{LLMError, LLMProvider, LLMRequest, LLMResponse};
pub use roles::{RoleProfile, TutorialAssistant, TutorialReport};
pub use schema::{ActionKind, Memory, Message};
pub use tutorial::{TutorialDocument, TutorialWriter};
