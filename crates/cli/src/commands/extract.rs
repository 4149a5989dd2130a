//! Extract command handler.
//!
//! Turns a text document into price records.

use super::print_json;
use clap::Args;
use pricelens_analysis::Dataset;
use pricelens_core::AppResult;
use std::path::PathBuf;

/// Extract price records from a text document
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Text file to read
    pub file: PathBuf,
}

impl ExtractCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing extract command");

        let text = std::fs::read_to_string(&self.file)?;
        let dataset = Dataset::from_text(&text)?;

        tracing::info!("Extracted {} records from {:?}", dataset.len(), self.file);
        print_json(&dataset)
    }
}
