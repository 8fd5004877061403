//! # LLM Integration Layer
//!
//! A small provider-agnostic interface used by the action nodes. Each
//! provider turns an [`LLMRequest`] into its vendor's HTTP call and maps the
//! reply back into an [`LLMResponse`].
//!
//! | Provider | Endpoint |
//! |----------|----------|
//! | OpenAI (and compatible gateways) | `/chat/completions` |
//! | Anthropic | `/messages` |
//! | Gemini | `/models/{model}:generateContent` |
//!
//! ```rust,no_run
//! use stitch_core::llm::factory::create_provider_with_config;
//! use stitch_core::llm::provider::{LLMProvider, LLMRequest};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = create_provider_with_config(
//!     "openai",
//!     Some(std::env::var("OPENAI_API_KEY")?),
//!     None,
//!     Some("gpt-5-mini".to_string()),
//! )?;
//! let response = provider
//!     .generate(LLMRequest::single_turn("gpt-5-mini", "Outline a Git tutorial"))
//!     .await?;
//! println!("{}", response.content.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod error_display;
pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::{LLMFactory, create_provider_with_config, get_factory};
pub use provider::{LLMError, LLMProvider, LLMRequest, LLMResponse};
pub use providers::{AnthropicProvider, GeminiProvider, OpenAIProvider};
