//! Price records and the dataset that carries them through the pipeline.

use crate::aggregate::parse_price_difference;
use crate::extract::extract;
use pricelens_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One price-comparison entry.
///
/// `price_difference` stays in its source form (e.g. `"10.00%"`) and is
/// parsed on demand with [`PriceRecord::price_difference_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub category: String,
    pub product: String,
    pub barcode: String,
    pub retailer: String,
    pub price_count: u32,
    pub average_price: f64,
    pub price_difference: String,
}

impl PriceRecord {
    /// Price difference as a number; unparseable values read as 0.
    pub fn price_difference_value(&self) -> f64 {
        parse_price_difference(&self.price_difference)
    }

    /// Composite product identity used for distinct-product counts.
    pub fn product_identity(&self) -> String {
        format!("{}-{}", self.product, self.barcode)
    }
}

/// Non-empty, ordered sequence of records.
///
/// Record order is significant: grouping and tie-breaks follow first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<PriceRecord>,
}

impl Dataset {
    /// Wrap records, rejecting an empty sequence.
    pub fn new(records: Vec<PriceRecord>) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::Validation(
                "No data provided or invalid data format".to_string(),
            ));
        }
        Ok(Self { records })
    }

    /// Extract records from document text.
    ///
    /// Returns `AppError::ExtractionEmpty` when no line matched the grammar.
    pub fn from_text(text: &str) -> AppResult<Self> {
        let records = extract(text);
        if records.is_empty() {
            return Err(AppError::ExtractionEmpty(
                "Could not extract data from the document. Please ensure it follows the required format."
                    .to_string(),
            ));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
