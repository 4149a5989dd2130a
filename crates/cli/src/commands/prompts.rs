//! Prompts command handler.

use clap::Args;
use pricelens_core::{config::AppConfig, AppResult};
use pricelens_prompt::{list_prompts, load_prompt};

/// List available prompt definitions
#[derive(Args, Debug)]
pub struct PromptsCommand {
    /// Show title and sampling parameters
    #[arg(short, long)]
    pub detailed: bool,
}

impl PromptsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing prompts command");

        for id in list_prompts(&config.workspace)? {
            if !self.detailed {
                println!("{}", id);
                continue;
            }

            let prompt = load_prompt(&config.workspace, &id)?;
            println!(
                "{}\t{}\t(temperature {}, max tokens {})",
                prompt.id, prompt.title, prompt.parameters.temperature, prompt.parameters.max_tokens
            );
        }

        Ok(())
    }
}
