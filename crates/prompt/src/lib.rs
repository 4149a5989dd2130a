//! Prompt system for PriceLens.
//!
//! This crate provides structured prompt management with:
//! - YAML prompt definitions, built in or overridden per workspace
//! - Handlebars template rendering for system and user messages
//! - Sampling parameters carried alongside each template

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{builtin_prompt, list_prompts, load_prompt, CHAT_PROMPT_ID, INSIGHTS_PROMPT_ID};
pub use types::{
    BuiltPrompt, BuiltPromptMetadata, PromptDefinition, PromptOutputSpec, PromptParameters,
};
