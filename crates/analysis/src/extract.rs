//! Record extraction from document text.
//!
//! Each non-blank line is matched against a positional grammar:
//!
//! ```text
//! CATEGORY  PRODUCT      BARCODE     RETAILER  COUNT  AVG PRICE  DIFF
//! FOOD      Whole Milk   1234567890  A         5      2,50       10.00%
//! ```
//!
//! CATEGORY is one or more uppercase words, PRODUCT is any run without
//! digits, and the retailer code matches regardless of case. Lines that do not
//! fit are skipped without error.

use crate::record::PriceRecord;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RECORD_LINE: Regex = Regex::new(
        r"([A-Z][A-Z\s]*)\s+([^\d]+)\s+(\d+)\s+((?i:[A-Z]+))\s+(\d+)\s+(\d+[.,]\d+)\s+(\d+[.,]\d+%)"
    )
    .expect("record line pattern is valid");
}

/// Extract every record the text contains, in line order.
///
/// An empty result is not an error here; callers decide what it means (see
/// [`Dataset::from_text`](crate::record::Dataset::from_text)).
pub fn extract(text: &str) -> Vec<PriceRecord> {
    let mut scanned = 0usize;

    let records: Vec<PriceRecord> = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .inspect(|_| scanned += 1)
        .filter_map(parse_line)
        .collect();

    tracing::debug!(
        lines = scanned,
        matched = records.len(),
        "Extracted price records"
    );

    records
}

/// Parse one line, or `None` if it does not fit the grammar.
pub fn parse_line(line: &str) -> Option<PriceRecord> {
    let caps = RECORD_LINE.captures(line)?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str().trim()).unwrap_or_default();

    let price_count = field(5).parse::<u32>().ok()?;
    let average_price = parse_decimal(field(6))?;

    Some(PriceRecord {
        category: field(1).to_string(),
        product: field(2).to_string(),
        barcode: field(3).to_string(),
        retailer: field(4).to_string(),
        price_count,
        average_price,
        price_difference: field(7).to_string(),
    })
}

/// Parse a decimal that may use a comma separator.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse::<f64>().ok()
}
