//! Choices for the cascading area → locality → street selectors.

use crate::core::dataset::Dataset;
use crate::core::selection::LOCALITY_NULL_VALUE;
use std::collections::BTreeSet;

/// Distinct areas, sorted ascending.
pub fn list_areas(dataset: &Dataset) -> Vec<String> {
    dataset
        .records()
        .iter()
        .map(|r| r.area.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// `null_value` followed by the sorted localities within `area`.
///
/// Empty when no area is chosen or `area` is itself the placeholder.
pub fn list_localities(dataset: &Dataset, area: Option<&str>, null_value: &str) -> Vec<String> {
    let Some(area) = area.filter(|a| !a.is_empty() && *a != null_value) else {
        return Vec::new();
    };

    with_placeholder(
        null_value,
        dataset
            .records()
            .iter()
            .filter(|r| r.area == area)
            .filter_map(|r| r.locality.as_deref()),
    )
}

/// `null_value` followed by the sorted streets within `area` and `locality`.
///
/// Empty unless both are chosen and the locality is neither `null_value` nor
/// the locality placeholder.
pub fn list_streets(
    dataset: &Dataset,
    area: Option<&str>,
    locality: Option<&str>,
    null_value: &str,
) -> Vec<String> {
    let (Some(area), Some(locality)) = (
        area.filter(|a| !a.is_empty()),
        locality.filter(|l| !l.is_empty()),
    ) else {
        return Vec::new();
    };
    if locality == null_value || locality == LOCALITY_NULL_VALUE {
        return Vec::new();
    }

    with_placeholder(
        null_value,
        dataset
            .records()
            .iter()
            .filter(|r| r.area == area && r.locality.as_deref() == Some(locality))
            .filter_map(|r| r.street.as_deref()),
    )
}

fn with_placeholder<'a>(null_value: &str, values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.collect();
    std::iter::once(null_value)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{PropertyType, SaleRecord};
    use crate::core::selection::{LOCALITY_NULL_VALUE, STREET_NULL_VALUE};
    use chrono::NaiveDate;

    fn record(area: &str, locality: Option<&str>, street: Option<&str>) -> SaleRecord {
        SaleRecord {
            sale_date: NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
            sale_price: 100_000,
            property_type: PropertyType::Flat,
            area: area.to_string(),
            locality: locality.map(str::to_string),
            street: street.map(str::to_string),
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("Powys", Some("Welshpool"), Some("Broad Street")),
            record("Cardiff", Some("Cardiff"), Some("Queen Street")),
            record("Cardiff", Some("Penarth"), Some("Plymouth Road")),
            record("Cardiff", Some("Cardiff"), Some("Albany Road")),
            record("Cardiff", Some("Cardiff"), Some("Queen Street")),
            record("Cardiff", None, Some("Nowhere Lane")),
            record("Cardiff", Some("Cardiff"), None),
            record("Anglesey", Some("Holyhead"), None),
        ])
    }

    #[test]
    fn test_list_areas_sorted_and_distinct() {
        let areas = list_areas(&dataset());
        assert_eq!(areas, vec!["Anglesey", "Cardiff", "Powys"]);
        assert!(list_areas(&Dataset::default()).is_empty());
    }

    #[test]
    fn test_list_localities() {
        let localities = list_localities(&dataset(), Some("Cardiff"), LOCALITY_NULL_VALUE);
        assert_eq!(localities, vec![LOCALITY_NULL_VALUE, "Cardiff", "Penarth"]);
    }

    #[test]
    fn test_list_localities_without_area() {
        let data = dataset();
        assert!(list_localities(&data, None, LOCALITY_NULL_VALUE).is_empty());
        assert!(list_localities(&data, Some(""), LOCALITY_NULL_VALUE).is_empty());
        assert!(
            list_localities(&data, Some(LOCALITY_NULL_VALUE), LOCALITY_NULL_VALUE).is_empty()
        );
    }

    #[test]
    fn test_list_localities_unknown_area_has_only_placeholder() {
        let localities = list_localities(&dataset(), Some("Gwynedd"), LOCALITY_NULL_VALUE);
        assert_eq!(localities, vec![LOCALITY_NULL_VALUE]);
    }

    #[test]
    fn test_list_streets() {
        let streets = list_streets(
            &dataset(),
            Some("Cardiff"),
            Some("Cardiff"),
            STREET_NULL_VALUE,
        );
        assert_eq!(
            streets,
            vec![STREET_NULL_VALUE, "Albany Road", "Queen Street"]
        );
    }

    #[test]
    fn test_list_streets_requires_area_and_locality() {
        let data = dataset();
        assert!(list_streets(&data, None, Some("Cardiff"), STREET_NULL_VALUE).is_empty());
        assert!(list_streets(&data, Some("Cardiff"), None, STREET_NULL_VALUE).is_empty());
        assert!(
            list_streets(
                &data,
                Some("Cardiff"),
                Some(STREET_NULL_VALUE),
                STREET_NULL_VALUE
            )
            .is_empty()
        );
        assert!(
            list_streets(
                &data,
                Some("Cardiff"),
                Some(LOCALITY_NULL_VALUE),
                STREET_NULL_VALUE
            )
            .is_empty()
        );
    }

    #[test]
    fn test_scenario_listings() {
        let data = Dataset::from_records(vec![
            record("A", Some("X"), None),
            record("A", Some("Y"), None),
            record("B", Some("Z"), None),
        ]);
        assert_eq!(list_areas(&data), vec!["A", "B"]);
        assert_eq!(
            list_localities(&data, Some("A"), "--none--"),
            vec!["--none--", "X", "Y"]
        );
    }
}
