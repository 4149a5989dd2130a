//! LLM provider factory.
//!
//! Builds a client from already-resolved settings. Credentials arrive as
//! arguments; this module never reads the environment.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use pricelens_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "ollama")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key, required by OpenAI
/// * `timeout_secs` - Optional request timeout (Ollama only)
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or a required
/// credential is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    timeout_secs: Option<u64>,
) -> AppResult<Arc<dyn LlmClient>> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| AppError::Config(format!("Unknown provider: {}", provider)))?;
    let base_url = endpoint.unwrap_or(provider_type.default_endpoint());

    tracing::debug!(provider = provider_type.as_str(), endpoint = base_url, "Creating LLM client");

    match provider_type {
        ProviderType::OpenAI => {
            let key = api_key.ok_or_else(|| {
                AppError::Config("OpenAI provider requires API key".to_string())
            })?;
            Ok(Arc::new(OpenAiClient::with_base_url(key, base_url)))
        }
        ProviderType::Ollama => match timeout_secs {
            Some(secs) => Ok(Arc::new(OllamaClient::with_timeout(base_url, secs)?)),
            None => Ok(Arc::new(OllamaClient::with_base_url(base_url))),
        },
    }
}
