//! Request/response handling for one exploration session.
//!
//! An [`Explorer`] holds the loaded dataset and memoised selector listings.
//! Each call takes an explicit [`Selection`] and derives everything else from it.

use crate::core::analytics::{self, SummaryMetrics};
use crate::core::cache::Memo;
use crate::core::chart::{self, Chart};
use crate::core::dataset::{Dataset, FilteredView};
use crate::core::selection::{LOCALITY_NULL_VALUE, STREET_NULL_VALUE, Selection};
use crate::core::selector;
use std::sync::Arc;
use tracing::{debug, info};

/// Everything shown for one selection.
#[derive(Debug, Clone)]
pub struct Exploration<'a> {
    pub heading: String,
    pub metrics: SummaryMetrics,
    pub transactions: Chart,
    pub property_types: Chart,
    pub median_prices: Chart,
    pub view: FilteredView<'a>,
}

pub struct Explorer {
    dataset: Arc<Dataset>,
    region: String,
    currency_symbol: String,
    areas: Memo<(), Vec<String>>,
    localities: Memo<String, Vec<String>>,
    streets: Memo<(String, String), Vec<String>>,
}

impl Explorer {
    pub fn new(
        dataset: Arc<Dataset>,
        region: impl Into<String>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            dataset,
            region: region.into(),
            currency_symbol: currency_symbol.into(),
            areas: Memo::new(),
            localities: Memo::new(),
            streets: Memo::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn areas(&self) -> Vec<String> {
        self.areas
            .get_or_insert_with((), || selector::list_areas(&self.dataset))
    }

    /// Locality choices for `area`, placeholder first.
    pub fn localities(&self, area: Option<&str>) -> Vec<String> {
        match area {
            Some(a) => self.localities.get_or_insert_with(a.to_string(), || {
                selector::list_localities(&self.dataset, Some(a), LOCALITY_NULL_VALUE)
            }),
            None => Vec::new(),
        }
    }

    /// Street choices for `area` and `locality`, placeholder first.
    pub fn streets(&self, area: Option<&str>, locality: Option<&str>) -> Vec<String> {
        match (area, locality) {
            (Some(a), Some(l)) => self
                .streets
                .get_or_insert_with((a.to_string(), l.to_string()), || {
                    selector::list_streets(&self.dataset, Some(a), Some(l), STREET_NULL_VALUE)
                }),
            _ => Vec::new(),
        }
    }

    /// Builds the report for `selection`, or `None` until an area is chosen.
    pub fn explore(&self, selection: &Selection) -> Option<Exploration<'_>> {
        selection.area()?;

        let filter = selection.filter();
        let view = filter.apply(&self.dataset);
        info!(
            constraints = filter.constraints().len(),
            records = view.len(),
            "Applied selection filter"
        );

        let metrics = analytics::summary_metrics(&view);
        let transactions = chart::transactions_chart(&analytics::transactions_per_year(&view));
        let property_types =
            chart::property_type_counts_chart(&analytics::counts_by_property_type(&view));
        let median_prices = chart::median_price_chart(
            &analytics::median_price_by_property_type(&view),
            &self.currency_symbol,
        );

        Some(Exploration {
            heading: selection.describe(),
            metrics,
            transactions,
            property_types,
            median_prices,
            view,
        })
    }

    /// Ridge plot of every area's prices for the fixed distribution year.
    pub fn overview(&self) -> Chart {
        let areas = self.areas();
        let distributions = analytics::price_distribution_by_area(&self.dataset, &areas);
        debug!(areas = areas.len(), "Building area overview");
        chart::area_ridge_chart(&distributions, &self.region, &self.currency_symbol)
    }
}
