//! Chat command handler.
//!
//! Answers one question about a dataset.

use super::{connect, load_dataset, print_json};
use clap::Args;
use pricelens_analysis::DialogueResponder;
use pricelens_core::{config::AppConfig, AppResult};
use pricelens_prompt::{load_prompt, CHAT_PROMPT_ID};
use std::path::PathBuf;

/// Ask a question about a dataset
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Records file (.json) or text document
    #[arg(short, long)]
    pub data: PathBuf,

    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");
        tracing::debug!("Question: {}", self.question);

        let dataset = load_dataset(&self.data)?;
        let client = connect(config)?;
        let prompt = load_prompt(&config.workspace, CHAT_PROMPT_ID)?;

        let responder = DialogueResponder::new(client, &config.model)?.with_prompt(prompt);
        let answer = responder.respond(&self.question, &dataset).await?;

        if self.json {
            print_json(&serde_json::json!({
                "response": answer,
                "model": config.model,
                "provider": config.provider,
            }))
        } else {
            println!("{}", answer);
            Ok(())
        }
    }
}
