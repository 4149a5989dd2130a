//! Charts command handler.

use super::{load_dataset, print_json};
use clap::Args;
use pricelens_analysis::build_charts;
use pricelens_core::AppResult;
use std::path::PathBuf;

/// Build chart series for a dataset
#[derive(Args, Debug)]
pub struct ChartsCommand {
    /// Records file (.json) or text document
    #[arg(short, long)]
    pub data: PathBuf,

    /// Seed for the synthetic trend series (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ChartsCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing charts command");

        let dataset = load_dataset(&self.data)?;
        let charts = build_charts(&dataset, self.seed);

        print_json(&charts)
    }
}
