//! Minimized dataset summary sent to the completion service.
//!
//! Only grouped statistics and counts go out; product names and barcodes stay
//! local.

use crate::aggregate::{by_category, by_retailer, distinct_count, round2, GroupStats};
use crate::record::Dataset;
use indexmap::IndexMap;
use pricelens_core::AppResult;
use serde::Serialize;

/// Counts at the top of the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCounts {
    pub retailer_count: usize,
    pub category_count: usize,
    /// Distinct barcodes
    pub product_count: usize,
    pub total_entries: usize,
}

/// Per-group figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub avg_price: f64,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub summary: SummaryCounts,
    pub retailers: IndexMap<String, GroupSummary>,
    pub categories: IndexMap<String, GroupSummary>,
}

impl DataSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let retailers = by_retailer(dataset);
        let categories = by_category(dataset);

        Self {
            summary: SummaryCounts {
                retailer_count: retailers.len(),
                category_count: categories.len(),
                product_count: distinct_count(dataset, |r| r.barcode.as_str()),
                total_entries: dataset.len(),
            },
            retailers: summarize(&retailers),
            categories: summarize(&categories),
        }
    }

    /// Compact JSON, as embedded in prompts.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub(crate) fn summarize(stats: &GroupStats) -> IndexMap<String, GroupSummary> {
    stats
        .iter()
        .map(|(key, stat)| {
            (
                key.to_string(),
                GroupSummary {
                    avg_price: round2(stat.mean_price()),
                    item_count: stat.count,
                },
            )
        })
        .collect()
}
