//! Loading of the sales dataset from its columnar file.

use crate::core::error::ExplorerError;
use crate::core::record::{PropertyType, SaleRecord};
use chrono::{DateTime, NaiveDate};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Fixed relative location of the sales file.
pub const DEFAULT_DATA_PATH: &str = "./data/wales.parquet";

pub const AREA_COLUMN: &str = "county";
pub const LOCALITY_COLUMN: &str = "town_city";
pub const STREET_COLUMN: &str = "street";
pub const PROPERTY_TYPE_COLUMN: &str = "property_type";
pub const SALE_DATE_COLUMN: &str = "sale_date";
pub const SALE_PRICE_COLUMN: &str = "sale_price";

/// Columns every row needs; a file without one of them is unusable.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    AREA_COLUMN,
    PROPERTY_TYPE_COLUMN,
    SALE_DATE_COLUMN,
    SALE_PRICE_COLUMN,
];

// Days between 0001-01-01 and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// The full, read-only set of sale records for a session.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SaleRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A view over every record, unfiltered.
    pub fn view(&self) -> FilteredView<'_> {
        self.records.iter().collect()
    }
}

/// The records matching a selection. Borrowed from the dataset, never stored.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a SaleRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a SaleRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SaleRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> FromIterator<&'a SaleRecord> for FilteredView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a SaleRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Reads the whole Parquet file at `path` into memory.
///
/// The file must have every column in [`REQUIRED_COLUMNS`].
///
/// Rows without an area, sale date, sale price or property type are skipped
/// and reported in the log; the remaining rows keep their file order.
pub fn load(path: &Path) -> Result<Dataset, ExplorerError> {
    info!(path = %path.display(), "Loading sales dataset");

    let file = File::open(path).map_err(|e| ExplorerError::data_unavailable(path, e))?;
    let reader =
        SerializedFileReader::new(file).map_err(|e| ExplorerError::data_unavailable(path, e))?;
    debug!(
        rows = reader.metadata().file_metadata().num_rows(),
        "Opened parquet file"
    );

    let schema = reader.metadata().file_metadata().schema_descr();
    let present: Vec<&str> = schema
        .root_schema()
        .get_fields()
        .iter()
        .map(|field| field.name())
        .collect();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !present.contains(*column))
    {
        return Err(ExplorerError::data_unavailable(
            path,
            format!("missing column {missing}"),
        ));
    }

    let rows = reader
        .get_row_iter(None)
        .map_err(|e| ExplorerError::data_unavailable(path, e))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let row = row.map_err(|e| ExplorerError::data_unavailable(path, e))?;
        match record_from_columns(row.get_column_iter()) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped sale records with missing required columns");
    }
    info!(records = records.len(), "Loaded sales dataset");
    Ok(Dataset::from_records(records))
}

/// Builds a record from one row's `(column, value)` pairs.
pub(crate) fn record_from_columns<'a, I>(columns: I) -> Option<SaleRecord>
where
    I: IntoIterator<Item = (&'a String, &'a Field)>,
{
    let mut area = None;
    let mut locality = None;
    let mut street = None;
    let mut property_type = None;
    let mut sale_date = None;
    let mut sale_price = None;

    for (name, field) in columns {
        match name.as_str() {
            AREA_COLUMN => area = field_text(field),
            LOCALITY_COLUMN => locality = field_text(field),
            STREET_COLUMN => street = field_text(field),
            PROPERTY_TYPE_COLUMN => {
                property_type = field_text(field).map(|text| {
                    text.parse::<PropertyType>().unwrap_or_else(|_| {
                        debug!(value = %text, "Unrecognised property type, using Other");
                        PropertyType::Other
                    })
                })
            }
            SALE_DATE_COLUMN => sale_date = field_date(field),
            SALE_PRICE_COLUMN => sale_price = field_price(field),
            _ => {}
        }
    }

    Some(SaleRecord {
        sale_date: sale_date?,
        sale_price: sale_price?,
        property_type: property_type?,
        area: area?,
        locality,
        street,
    })
}

fn field_text(field: &Field) -> Option<String> {
    let text = match field {
        Field::Str(s) => s.as_str(),
        Field::Bytes(bytes) => bytes.as_utf8().ok()?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn field_date(field: &Field) -> Option<NaiveDate> {
    match field {
        Field::Date(days) => {
            NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
        }
        Field::TimestampMillis(ms) => DateTime::from_timestamp_millis(*ms).map(|d| d.date_naive()),
        Field::TimestampMicros(us) => DateTime::from_timestamp_micros(*us).map(|d| d.date_naive()),
        // pandas writes datetime64[ns] as plain INT64 nanoseconds.
        Field::Long(ns) => Some(DateTime::from_timestamp_nanos(*ns).date_naive()),
        Field::Str(s) => NaiveDate::parse_from_str(s.trim().get(..10)?, "%Y-%m-%d").ok(),
        _ => None,
    }
}

fn field_price(field: &Field) -> Option<i64> {
    match field {
        Field::Int(v) => Some(i64::from(*v)),
        Field::Long(v) => Some(*v),
        Field::Float(v) if v.is_finite() => Some(v.round() as i64),
        Field::Double(v) if v.is_finite() => Some(v.round() as i64),
        Field::Str(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
