//! Insights command handler.
//!
//! Produces an insight report for a dataset, falling back to computed text
//! when the provider is out of quota.

use super::{connect, load_dataset, print_json};
use clap::Args;
use pricelens_analysis::{InsightOptions, InsightSynthesizer};
use pricelens_core::{config::AppConfig, AppResult};
use pricelens_prompt::{load_prompt, INSIGHTS_PROMPT_ID};
use std::path::PathBuf;

/// Generate insights for a dataset
#[derive(Args, Debug)]
pub struct InsightsCommand {
    /// Records file (.json) or text document
    #[arg(short, long)]
    pub data: PathBuf,

    /// Compare retailer pricing
    #[arg(long)]
    pub price_comparison: bool,

    /// Identify market trends
    #[arg(long)]
    pub market_trends: bool,

    /// Predict price movements
    #[arg(long)]
    pub predictions: bool,

    /// Suggest shopping recommendations
    #[arg(long)]
    pub recommendations: bool,

    /// Enable every section
    #[arg(long)]
    pub all: bool,
}

impl InsightsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing insights command");

        let dataset = load_dataset(&self.data)?;
        let client = connect(config)?;
        let prompt = load_prompt(&config.workspace, INSIGHTS_PROMPT_ID)?;

        let synthesizer = InsightSynthesizer::new(client, &config.model)?.with_prompt(prompt);
        let report = synthesizer.synthesize(&dataset, &self.options()).await?;

        tracing::info!(path = report.source.as_str(), "Insight report ready");
        print_json(&report)
    }

    fn options(&self) -> InsightOptions {
        if self.all {
            return InsightOptions::all();
        }

        InsightOptions {
            price_comparison: self.price_comparison,
            market_trends: self.market_trends,
            predictions: self.predictions,
            recommendations: self.recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(all: bool, predictions: bool) -> InsightsCommand {
        InsightsCommand {
            data: PathBuf::from("data.json"),
            price_comparison: false,
            market_trends: false,
            predictions,
            recommendations: false,
            all,
        }
    }

    #[test]
    fn test_all_enables_every_section() {
        assert_eq!(command(true, false).options(), InsightOptions::all());
    }

    #[test]
    fn test_individual_toggles() {
        let options = command(false, true).options();
        assert!(options.predictions);
        assert!(!options.price_comparison);
    }
}
