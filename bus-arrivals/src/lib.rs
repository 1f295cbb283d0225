//! Seoul bus arrivals sampler.
//!
//! Answers: "which buses are about to arrive, somewhere on a few routes
//! picked at random?" Routes come from a catalog file, live arrivals from
//! the Seoul bus information API, and the result is every bus due within
//! five minutes, ranked by ETA.

pub mod cache;
pub mod domain;
pub mod output;
pub mod pipeline;
pub mod seoul;
pub mod stations;
