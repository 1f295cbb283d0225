//! Route catalog loading.
//!
//! Reads the static list of routes from a JSON file at startup and turns
//! it into a validated `StationCatalog`.

mod error;
mod loader;

pub use error::StationError;
pub use loader::{load_catalog, parse_catalog};
