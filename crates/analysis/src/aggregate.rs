//! Grouping and summary statistics over a dataset.
//!
//! Groups keep first-seen key order, so anything that iterates them
//! (summaries, chart series, the lowest-price selection) is deterministic
//! for a given record order.

use crate::record::{Dataset, PriceRecord};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::hash::Hash;

/// Running totals for one group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupStat {
    pub count: usize,
    total: f64,
}

impl GroupStat {
    /// Mean `average_price` over the group's records.
    pub fn mean_price(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Per-key statistics in first-seen key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupStats {
    groups: IndexMap<String, GroupStat>,
}

impl GroupStats {
    pub fn get(&self, key: &str) -> Option<&GroupStat> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupStat)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group records by `key_fn` in a single pass.
pub fn group_by<F>(dataset: &Dataset, key_fn: F) -> GroupStats
where
    F: Fn(&PriceRecord) -> &str,
{
    let mut groups: IndexMap<String, GroupStat> = IndexMap::new();

    for record in dataset {
        let key = key_fn(record);
        if !groups.contains_key(key) {
            groups.insert(key.to_string(), GroupStat::default());
        }
        let stat = &mut groups[key];
        stat.count += 1;
        stat.total += record.average_price;
    }

    GroupStats { groups }
}

/// Group by retailer code.
pub fn by_retailer(dataset: &Dataset) -> GroupStats {
    group_by(dataset, |r| r.retailer.as_str())
}

/// Group by category.
pub fn by_category(dataset: &Dataset) -> GroupStats {
    group_by(dataset, |r| r.category.as_str())
}

/// Number of distinct values `f` yields across the dataset.
pub fn distinct_count<'a, F, K>(dataset: &'a Dataset, f: F) -> usize
where
    F: Fn(&'a PriceRecord) -> K,
    K: Eq + Hash,
{
    dataset.iter().map(f).collect::<HashSet<K>>().len()
}

/// Distinct values of a string field, in first-seen order.
pub fn distinct_values<F>(dataset: &Dataset, f: F) -> Vec<String>
where
    F: Fn(&PriceRecord) -> &str,
{
    dataset
        .iter()
        .map(f)
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Parse a `"NN.NN%"` value. Anything unparseable reads as 0.
pub fn parse_price_difference(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    match number.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Arithmetic mean of every record's parsed price difference.
pub fn average_price_difference(dataset: &Dataset) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let sum: f64 = dataset.iter().map(PriceRecord::price_difference_value).sum();
    sum / dataset.len() as f64
}

/// Key with the lowest mean price.
///
/// Ties go to the key seen first, because only a strictly lower mean
/// replaces the current pick.
pub fn lowest_price_group(stats: &GroupStats) -> Option<&str> {
    let mut lowest: Option<(&str, f64)> = None;

    for (key, stat) in stats.iter() {
        let mean = stat.mean_price();
        match lowest {
            Some((_, best)) if mean >= best => {}
            _ => lowest = Some((key, mean)),
        }
    }

    lowest.map(|(key, _)| key)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
