//! Domain types for the bus arrival sampler.
//!
//! This module contains the validated data model shared by every stage
//! of the pipeline. Types enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod arrival;
mod catalog;
mod error;
mod route;

pub use arrival::{ArrivalItem, FilteredArrival, RankedArrival, RouteArrivals};
pub use catalog::StationCatalog;
pub use error::DomainError;
pub use route::{Route, RouteId, StationRef};

#[cfg(test)]
pub(crate) use arrival::test_support;
