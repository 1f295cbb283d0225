//! Catalog loading error types.

use crate::domain::DomainError;

/// Errors that can occur when loading the route catalog.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Catalog file could not be read
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON
    #[error("catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// No array of route records found in the document
    #[error("catalog has no array of route records")]
    MissingRecords,

    /// Records were found but do not form a valid catalog
    #[error(transparent)]
    Domain(#[from] DomainError),
}
