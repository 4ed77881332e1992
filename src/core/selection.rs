//! Selection state and the equality filter derived from it.

use crate::core::dataset::{Dataset, FilteredView};
use crate::core::error::ExplorerError;
use crate::core::record::SaleRecord;

/// List entry standing for "no locality chosen".
pub const LOCALITY_NULL_VALUE: &str = "-- No locality selected --";
/// List entry standing for "no street chosen".
pub const STREET_NULL_VALUE: &str = "-- No street selected --";

/// The (area, locality, street) drill-down chosen by the user.
///
/// A locality is only set when an area is, and a street only when a locality is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    area: Option<String>,
    locality: Option<String>,
    street: Option<String>,
}

impl Selection {
    /// Builds a selection, treating the sentinels and blank strings as unset.
    pub fn new(
        area: Option<&str>,
        locality: Option<&str>,
        street: Option<&str>,
    ) -> Result<Self, ExplorerError> {
        let area = normalise(area, None);
        let locality = normalise(locality, Some(LOCALITY_NULL_VALUE));
        let street = normalise(street, Some(STREET_NULL_VALUE));

        if locality.is_some() && area.is_none() {
            return Err(ExplorerError::InvalidSelectionState(
                "a locality requires an area".to_string(),
            ));
        }
        if street.is_some() && locality.is_none() {
            return Err(ExplorerError::InvalidSelectionState(
                "a street requires a locality".to_string(),
            ));
        }

        Ok(Self {
            area,
            locality,
            street,
        })
    }

    pub fn area(&self) -> Option<&str> {
        self.area.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    /// Header text for the results of this selection.
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [self.area(), self.locality(), self.street()]
            .into_iter()
            .flatten()
            .collect();
        format!("Results for {}", parts.join(", "))
    }

    pub fn filter(&self) -> SelectionFilter {
        SelectionFilter::from(self)
    }
}

fn normalise(value: Option<&str>, sentinel: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && Some(*v) != sentinel)
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Area,
    Locality,
    Street,
}

impl Column {
    fn value_of<'a>(&self, record: &'a SaleRecord) -> Option<&'a str> {
        match self {
            Column::Area => Some(record.area.as_str()),
            Column::Locality => record.locality.as_deref(),
            Column::Street => record.street.as_deref(),
        }
    }
}

/// Ordered equality constraints, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionFilter {
    constraints: Vec<(Column, String)>,
}

impl SelectionFilter {
    pub fn constraints(&self) -> &[(Column, String)] {
        &self.constraints
    }

    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.constraints
            .iter()
            .all(|(column, value)| column.value_of(record) == Some(value.as_str()))
    }

    pub fn apply<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        dataset
            .records()
            .iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

impl From<&Selection> for SelectionFilter {
    fn from(selection: &Selection) -> Self {
        let constraints = [
            (Column::Area, selection.area()),
            (Column::Locality, selection.locality()),
            (Column::Street, selection.street()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v.to_string())))
        .collect();
        Self { constraints }
    }
}
