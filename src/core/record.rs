use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PropertyType {
    Detached,
    SemiDetached,
    Terraced,
    Flat,
    Other,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Detached,
        PropertyType::SemiDetached,
        PropertyType::Terraced,
        PropertyType::Flat,
        PropertyType::Other,
    ];

    /// Label used in tables and chart categories.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Detached => "Detached",
            PropertyType::SemiDetached => "Semi-Detached",
            PropertyType::Terraced => "Terraced",
            PropertyType::Flat => "Flat/Maisonette",
            PropertyType::Other => "Other",
        }
    }
}

impl Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PropertyType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "detached" => Ok(PropertyType::Detached),
            "s" | "semi-detached" | "semi detached" | "semidetached" => {
                Ok(PropertyType::SemiDetached)
            }
            "t" | "terraced" | "terrace" => Ok(PropertyType::Terraced),
            "f" | "flat" | "flat/maisonette" | "flats/maisonettes" | "maisonette" => {
                Ok(PropertyType::Flat)
            }
            "o" | "other" => Ok(PropertyType::Other),
            _ => Err(anyhow::anyhow!("Unknown property type: {}", s)),
        }
    }
}

/// One historic residential sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    pub sale_date: NaiveDate,
    pub sale_price: i64,
    pub property_type: PropertyType,
    pub area: String,
    pub locality: Option<String>,
    pub street: Option<String>,
}

impl SaleRecord {
    pub fn year(&self) -> i32 {
        self.sale_date.year()
    }
}
