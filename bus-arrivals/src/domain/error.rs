//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from feed and IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Route identifier was empty after trimming
    #[error("invalid route ID: {0:?}")]
    InvalidRouteId(String),

    /// Catalog contains no routes
    #[error("station catalog is empty")]
    EmptyCatalog,
}
