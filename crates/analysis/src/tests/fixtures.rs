//! Record builders for tests.

use crate::record::{Dataset, PriceRecord};

/// Document text with a header, two retailers and two categories.
pub(crate) const SAMPLE_TEXT: &str = "Price comparison export\n\
    CATEGORY PRODUCT BARCODE RETAILER COUNT AVG DIFF\n\
    DAIRY Whole Milk 5901234123457 B 4 2,40 8.00%\n\
    DAIRY Whole Milk 5901234123457 A 6 2.10 4.00%\n\
    BAKERY Rye Bread 7700112233 B 2 3.60 12.00%\n\
    BAKERY Rye Bread 7700112233 A 3 3.50 6.00%\n";

/// A single-observation "Milk" record with the given grouping fields.
pub(crate) fn record(
    category: &str,
    retailer: &str,
    average_price: f64,
    price_difference: &str,
) -> PriceRecord {
    PriceRecord {
        category: category.to_string(),
        product: "Milk".to_string(),
        barcode: "1000".to_string(),
        retailer: retailer.to_string(),
        price_count: 1,
        average_price,
        price_difference: price_difference.to_string(),
    }
}

pub(crate) fn with_product(mut record: PriceRecord, product: &str, barcode: &str) -> PriceRecord {
    record.product = product.to_string();
    record.barcode = barcode.to_string();
    record
}

pub(crate) fn dataset(records: Vec<PriceRecord>) -> Dataset {
    Dataset::new(records).expect("test dataset is not empty")
}

pub(crate) fn sample_dataset() -> Dataset {
    Dataset::from_text(SAMPLE_TEXT).expect("sample text has records")
}
