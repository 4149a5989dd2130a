//! Command handlers for the PriceLens CLI.
//!
//! Each subcommand lives in its own module; shared input and client setup
//! lives here.

pub mod charts;
pub mod chat;
pub mod extract;
pub mod ingest;
pub mod insights;
pub mod prompts;

pub use charts::ChartsCommand;
pub use chat::ChatCommand;
pub use extract::ExtractCommand;
pub use ingest::IngestCommand;
pub use insights::InsightsCommand;
pub use prompts::PromptsCommand;

use pricelens_analysis::{ingest_json, Dataset};
use pricelens_core::{config::AppConfig, AppResult};
use pricelens_llm::{create_client, LlmClient};
use std::path::Path;
use std::sync::Arc;

/// Load a dataset from a `.json` records file or a text document.
pub fn load_dataset(path: &Path) -> AppResult<Dataset> {
    let contents = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        tracing::debug!("Loading records from JSON: {:?}", path);
        Ok(ingest_json(&contents)?.into_dataset())
    } else {
        tracing::debug!("Extracting records from text: {:?}", path);
        Dataset::from_text(&contents)
    }
}

/// Validate the provider settings and build its client.
pub fn connect(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    config.validate()?;

    let endpoint = config.resolve_endpoint(&config.provider);
    let api_key = config.resolve_api_key(&config.provider);

    create_client(
        &config.provider,
        endpoint.as_deref(),
        api_key.as_deref(),
        config.resolve_timeout(&config.provider),
    )
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricelens_core::AppError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_dataset_from_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, "Header\nFOOD Milk 1234567890 A 5 2,50 10.00%\n").unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].average_price, 2.5);
    }

    #[test]
    fn test_load_dataset_from_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.JSON");
        fs::write(
            &path,
            r#"[{"category":"FOOD","product":"Milk","barcode":"1","retailer":"A","priceCount":1,"averagePrice":2.5,"priceDifference":"1%"}]"#,
        )
        .unwrap();

        assert_eq!(load_dataset(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_load_dataset_without_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "nothing here").unwrap();

        assert!(matches!(load_dataset(&path), Err(AppError::ExtractionEmpty(_))));
    }
}
