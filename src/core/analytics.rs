//! Provides the aggregations behind the explorer's charts and metrics.
//!
//! Every function here is pure: the same view yields the same result, which is
//! what lets callers memoise them freely.
use crate::core::dataset::{Dataset, FilteredView};
use crate::core::record::PropertyType;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Sale year shown by the area price distribution.
pub const RIDGE_YEAR: i32 = 2023;
/// Prices at or above this are left out of the area price distribution.
pub const RIDGE_PRICE_CAP: i64 = 500_000;

/// Headline numbers for a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub record_count: usize,
    pub median_price: Option<f64>,
}

pub fn summary_metrics(view: &FilteredView<'_>) -> SummaryMetrics {
    let mut prices: Vec<i64> = view.iter().map(|r| r.sale_price).collect();
    SummaryMetrics {
        record_count: view.len(),
        median_price: median(&mut prices),
    }
}

/// Number of sales per calendar year, ascending.
///
/// Years between the first and last sale that have no sales are reported
/// with a count of zero.
pub fn transactions_per_year(view: &FilteredView<'_>) -> Vec<(i32, usize)> {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    for record in view.iter() {
        *per_year.entry(record.year()).or_insert(0) += 1;
    }

    let (Some(first), Some(last)) = (
        per_year.keys().next().copied(),
        per_year.keys().next_back().copied(),
    ) else {
        debug!("No sales to count per year");
        return Vec::new();
    };

    (first..=last)
        .map(|year| (year, per_year.get(&year).copied().unwrap_or(0)))
        .collect()
}

/// Number of sales per property type, ascending by count.
pub fn counts_by_property_type(view: &FilteredView<'_>) -> Vec<(PropertyType, usize)> {
    let mut counts: HashMap<PropertyType, usize> = HashMap::new();
    for record in view.iter() {
        *counts.entry(record.property_type).or_insert(0) += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|(type_a, a), (type_b, b)| a.cmp(b).then(type_a.cmp(type_b)));
    counts
}

/// Median sale price per property type, ascending by median.
pub fn median_price_by_property_type(view: &FilteredView<'_>) -> Vec<(PropertyType, f64)> {
    let mut prices: HashMap<PropertyType, Vec<i64>> = HashMap::new();
    for record in view.iter() {
        prices
            .entry(record.property_type)
            .or_default()
            .push(record.sale_price);
    }

    let mut medians: Vec<(PropertyType, f64)> = prices
        .into_iter()
        .filter_map(|(property_type, mut values)| {
            median(&mut values).map(|m| (property_type, m))
        })
        .collect();
    medians.sort_by(|(type_a, a), (type_b, b)| a.total_cmp(b).then(type_a.cmp(type_b)));
    medians
}

/// Sale prices per area for [`RIDGE_YEAR`], below [`RIDGE_PRICE_CAP`].
///
/// Areas keep the order they were given in, including ones with no sales.
pub fn price_distribution_by_area(dataset: &Dataset, areas: &[String]) -> Vec<(String, Vec<i64>)> {
    areas
        .iter()
        .map(|area| {
            let prices: Vec<i64> = dataset
                .records()
                .iter()
                .filter(|r| {
                    r.area == *area && r.sale_price < RIDGE_PRICE_CAP && r.year() == RIDGE_YEAR
                })
                .map(|r| r.sale_price)
                .collect();
            debug!(area = %area, sales = prices.len(), "Collected area price distribution");
            (area.clone(), prices)
        })
        .collect()
}

/// Median of `values`, averaging the middle pair for even lengths.
pub fn median(values: &mut [i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] as f64 + values[mid] as f64) / 2.0)
    } else {
        Some(values[mid] as f64)
    }
}
