//! Core data model, queries and chart descriptions

pub mod analytics;
pub mod cache;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod explorer;
pub mod log;
pub mod record;
pub mod selection;
pub mod selector;

// Re-export main types for cleaner imports
pub use dataset::{Dataset, FilteredView};
pub use error::ExplorerError;
pub use explorer::{Exploration, Explorer};
pub use record::{PropertyType, SaleRecord};
pub use selection::{LOCALITY_NULL_VALUE, STREET_NULL_VALUE, Selection, SelectionFilter};
