//! Chart-ready projections of a dataset.
//!
//! The trend series is synthetic: a per-retailer baseline modulated by a
//! seasonal sine and a random amplitude. Pass a seed to make it repeatable.

use crate::aggregate::{by_retailer, GroupStats};
use crate::record::Dataset;
use indexmap::IndexMap;
use rand::prelude::*;
use serde::Serialize;

/// Period labels on the trend axis.
pub const TREND_PERIODS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub retailer_data: RetailerSeries,
    pub product_data: Vec<ScatterSeries>,
    pub trend_data: TrendSeries,
}

/// Mean price per retailer, formatted with two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetailerSeries {
    pub labels: Vec<String>,
    pub prices: Vec<String>,
}

/// Price against price difference for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub label: String,
    pub data: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<TrendDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendDataset {
    pub label: String,
    pub data: Vec<String>,
}

/// Build all three series.
///
/// With `seed` the trend series is reproducible; without it each call
/// draws fresh amplitudes.
pub fn build_charts(dataset: &Dataset, seed: Option<u64>) -> ChartData {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let retailers = by_retailer(dataset);

    ChartData {
        retailer_data: retailer_series(&retailers),
        product_data: category_scatter(dataset),
        trend_data: trend_series(&retailers, &mut rng),
    }
}

pub fn retailer_series(retailers: &GroupStats) -> RetailerSeries {
    let (labels, prices) = retailers
        .iter()
        .map(|(retailer, stat)| (retailer.to_string(), format!("{:.2}", stat.mean_price())))
        .unzip();

    RetailerSeries { labels, prices }
}

pub fn category_scatter(dataset: &Dataset) -> Vec<ScatterSeries> {
    let mut series: IndexMap<&str, Vec<ScatterPoint>> = IndexMap::new();

    for record in dataset {
        series
            .entry(record.category.as_str())
            .or_default()
            .push(ScatterPoint {
                x: record.average_price,
                y: record.price_difference_value(),
            });
    }

    series
        .into_iter()
        .map(|(label, data)| ScatterSeries {
            label: label.to_string(),
            data,
        })
        .collect()
}

pub fn trend_series<R: Rng>(retailers: &GroupStats, rng: &mut R) -> TrendSeries {
    let datasets = retailers
        .iter()
        .map(|(retailer, stat)| {
            let baseline = stat.mean_price();
            let data = (0..TREND_PERIODS.len())
                .map(|i| {
                    let amplitude = 0.05 + rng.gen::<f64>() * 0.03;
                    let variation = (i as f64 / 2.0).sin() * amplitude;
                    format!("{:.2}", baseline * (1.0 + variation))
                })
                .collect();

            TrendDataset {
                label: retailer.to_string(),
                data,
            }
        })
        .collect();

    TrendSeries {
        labels: TREND_PERIODS.iter().map(|p| p.to_string()).collect(),
        datasets,
    }
}
