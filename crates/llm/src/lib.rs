//! LLM integration crate for PriceLens.
//!
//! This crate provides a provider-agnostic abstraction over text-completion
//! services. Every provider classifies failures into the three classes the
//! analysis pipeline distinguishes: rejected credential
//! (`AppError::LlmAuth`), exhausted quota or rate limiting
//! (`AppError::LlmQuota`), and anything else (`AppError::Llm`).
//!
//! # Providers
//! - **OpenAI**: Chat Completions API (default)
//! - **Ollama**: Local LLM runtime
//! - **Scripted**: Replays canned responses, for tests
//!
//! # Example
//! ```no_run
//! use pricelens_llm::{LlmClient, LlmRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...");
//! let request = LlmRequest::new("Which retailer is cheapest?", "gpt-3.5-turbo")
//!     .with_system("You are a retail data analyst.")
//!     .with_max_tokens(200);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use classify::classify_failure;
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient, ScriptedClient, ScriptedReply};
pub use types::ProviderType;
