//! Single-turn question answering over a dataset.

use crate::aggregate::{distinct_count, distinct_values};
use crate::record::Dataset;
use crate::request::completion_request;
use crate::summary::DataSummary;
use pricelens_core::{AppError, AppResult};
use pricelens_llm::LlmClient;
use pricelens_prompt::{build_prompt, builtin_prompt, PromptDefinition, CHAT_PROMPT_ID};
use std::collections::HashMap;
use std::sync::Arc;

/// Answers questions using the dataset summary as context.
pub struct DialogueResponder {
    client: Arc<dyn LlmClient>,
    model: String,
    prompt: PromptDefinition,
}

impl DialogueResponder {
    /// Create a responder with the built-in chat prompt.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            client,
            model: model.into(),
            prompt: builtin_prompt(CHAT_PROMPT_ID)?,
        })
    }

    /// Replace the prompt definition (e.g. a workspace override).
    pub fn with_prompt(mut self, prompt: PromptDefinition) -> Self {
        self.prompt = prompt;
        self
    }

    /// Answer `question`.
    ///
    /// On exhausted quota the answer is a fixed message describing the
    /// dataset; other client failures are returned.
    pub async fn respond(&self, question: &str, dataset: &Dataset) -> AppResult<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Validation("Question cannot be empty".to_string()));
        }

        let mut vars = HashMap::new();
        vars.insert(
            "summary".to_string(),
            DataSummary::from_dataset(dataset).to_json()?,
        );
        vars.insert("question".to_string(), question.to_string());

        let built = build_prompt(&self.prompt, vars)?;
        let request = completion_request(built, &self.model);

        match self.client.complete(&request).await {
            Ok(response) => {
                tracing::info!(path = "ai", "Answered question");
                Ok(response.content)
            }
            Err(e) if e.is_quota() => {
                tracing::warn!("Completion quota exhausted, answering from dataset: {}", e);
                tracing::info!(path = "fallback", "Answered question");
                Ok(fallback_answer(dataset))
            }
            Err(e) => Err(e),
        }
    }
}

/// Fixed answer describing the dataset.
pub fn fallback_answer(dataset: &Dataset) -> String {
    let retailers = distinct_values(dataset, |r| r.retailer.as_str());
    let categories = distinct_values(dataset, |r| r.category.as_str());
    let products = distinct_count(dataset, |r| r.product.as_str());

    format!(
        "I'm sorry, but I'm currently unable to process your request through the AI service due to usage limits.\n\
         \n\
         Here's some basic information about your data:\n\
         - Your data contains {} entries\n\
         - Retailers: {}\n\
         - Product categories: {}\n\
         - Number of unique products: {}\n\
         \n\
         For more detailed analysis, please try again later or contact support.",
        dataset.len(),
        retailers.join(", "),
        categories.join(", "),
        products
    )
}
