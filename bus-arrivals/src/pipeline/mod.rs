//! The arrival pipeline.
//!
//! This module implements the three stages that turn a route catalog
//! into a ranked list of buses arriving soon:
//!
//! 1. Sample routes at random, resampling while every route comes back
//!    empty
//! 2. Filter each route's arrivals down to buses arriving soon
//! 3. Merge all routes and rank by ETA

mod config;
mod error;
mod filter;
mod provider;
mod rank;
mod runner;
mod sample;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use filter::{DEPARTURE_PENDING, FilterPolicy, filter_soon_arrivals};
pub use provider::ArrivalProvider;
pub use rank::merge_and_rank;
pub use runner::{ArrivalPipeline, PipelineOutcome};
pub use sample::{Sample, sample_until_non_empty, select_sample};
