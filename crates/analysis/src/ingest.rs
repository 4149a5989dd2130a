//! Pass-through ingestion of already-structured records.
//!
//! Elements are kept as their original bytes so echoing a batch returns
//! exactly what was sent, alongside a typed [`Dataset`] for analysis.

use crate::record::{Dataset, PriceRecord};
use pricelens_core::{AppError, AppResult};
use serde_json::value::RawValue;

/// A validated JSON batch.
#[derive(Debug)]
pub struct IngestedBatch {
    raw: Vec<Box<RawValue>>,
    dataset: Dataset,
}

impl IngestedBatch {
    /// Elements exactly as received.
    pub fn raw_records(&self) -> impl Iterator<Item = &str> {
        self.raw.iter().map(|value| value.get())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// The batch as a JSON array of the original elements.
    pub fn to_json(&self) -> String {
        let elements: Vec<&str> = self.raw_records().collect();
        format!("[{}]", elements.join(","))
    }
}

/// Accept a JSON array of records.
pub fn ingest_json(text: &str) -> AppResult<IngestedBatch> {
    let raw: Vec<Box<RawValue>> = serde_json::from_str(text).map_err(|_| {
        AppError::Validation(
            "Invalid data format. Please provide an array of price data.".to_string(),
        )
    })?;

    let records = raw
        .iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_str::<PriceRecord>(value.get()).map_err(|e| {
                AppError::Validation(format!("Invalid record at index {}: {}", index, e))
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let dataset = Dataset::new(records)?;
    tracing::debug!(records = dataset.len(), "Ingested JSON batch");

    Ok(IngestedBatch { raw, dataset })
}
