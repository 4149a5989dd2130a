//! Computed narrative used when the completion service is out of quota.

use super::{InsightOptions, InsightSections, Recommendation};
use crate::aggregate::{by_category, by_retailer, lowest_price_group};
use crate::record::Dataset;

/// Build sections from grouped statistics alone.
pub fn fallback_sections(dataset: &Dataset, options: &InsightOptions) -> InsightSections {
    let retailers = by_retailer(dataset);
    let lowest = lowest_price_group(&retailers).unwrap_or_default();
    let category_count = by_category(dataset).len();

    InsightSections {
        price_comparison: options.price_comparison.then(|| {
            format!(
                "Based on the data, {} appears to have the most competitive pricing overall.",
                lowest
            )
        }),
        market_trends: options.market_trends.then(|| {
            "Data shows price variations across different retailers and product categories."
                .to_string()
        }),
        predictions: options.predictions.then(|| {
            "Without historical data, detailed predictions cannot be made. \
             Consider collecting price data over time for trend analysis."
                .to_string()
        }),
        recommendations: if options.recommendations {
            vec![
                Recommendation {
                    title: "Compare Prices".to_string(),
                    description: format!(
                        "Compare prices at {} with other retailers to find the best deals.",
                        lowest
                    ),
                },
                Recommendation {
                    title: "Track Price Changes".to_string(),
                    description: "Monitor prices over time to identify when to make purchases."
                        .to_string(),
                },
            ]
        } else {
            Vec::new()
        },
        product_analysis: format!(
            "Data includes products across {} categories with varying price points. \
             Consider detailed analysis by category.",
            category_count
        ),
    }
}
