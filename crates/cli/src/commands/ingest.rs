//! Ingest command handler.
//!
//! Validates a JSON records file and echoes it unchanged.

use clap::Args;
use pricelens_analysis::ingest_json;
use pricelens_core::AppResult;
use std::path::PathBuf;

/// Validate and echo a JSON array of records
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// JSON file to read
    pub file: PathBuf,
}

impl IngestCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing ingest command");

        let contents = std::fs::read_to_string(&self.file)?;
        let batch = ingest_json(&contents)?;

        tracing::info!("Accepted {} records", batch.dataset().len());
        println!("{}", batch.to_json());

        Ok(())
    }
}
