//! Domain errors for the explorer core.
//!
//! Empty selections are not errors: listings and aggregations over zero rows
//! return empty results and the charts built from them degrade to empty series.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// The sales dataset could not be opened or decoded.
    #[error("sales data unavailable at {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A locality was chosen without an area, or a street without a locality.
    #[error("invalid selection: {0}")]
    InvalidSelectionState(String),
}

impl ExplorerError {
    pub(crate) fn data_unavailable(path: &std::path::Path, reason: impl ToString) -> Self {
        ExplorerError::DataUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
