//! End-to-end pipeline: sample, filter, merge and rank.

use rand::Rng;
use tracing::info;

use crate::domain::{RankedArrival, RouteId, StationCatalog};

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::filter::filter_soon_arrivals;
use super::provider::ArrivalProvider;
use super::rank::merge_and_rank;
use super::sample::sample_until_non_empty;

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Arrivals that passed the filter, ranked by ETA. May be empty when
    /// the sampled routes had data but no bus was arriving soon.
    pub arrivals: Vec<RankedArrival>,

    /// Number of samples drawn.
    pub attempts: usize,

    /// Routes of the accepted sample that returned data, in sample order.
    pub sampled_routes: Vec<RouteId>,
}

/// Arrival pipeline over a catalog and a provider.
pub struct ArrivalPipeline<'a, P: ArrivalProvider> {
    provider: &'a P,
    catalog: &'a StationCatalog,
    config: &'a PipelineConfig,
}

impl<'a, P: ArrivalProvider> ArrivalPipeline<'a, P> {
    /// Create a new pipeline.
    pub fn new(provider: &'a P, catalog: &'a StationCatalog, config: &'a PipelineConfig) -> Self {
        Self {
            provider,
            catalog,
            config,
        }
    }

    /// Run the pipeline once.
    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PipelineOutcome, PipelineError> {
        let sample = sample_until_non_empty(self.catalog, self.config, self.provider, rng).await?;

        let sampled_routes: Vec<RouteId> = sample.routes.iter().map(|r| r.route.clone()).collect();
        let raw_count: usize = sample.routes.iter().map(|r| r.items.len()).sum();

        let per_route = sample
            .routes
            .into_iter()
            .map(|r| filter_soon_arrivals(r.items, &self.config.filter))
            .collect();
        let arrivals = merge_and_rank(per_route);

        info!(
            attempts = sample.attempts,
            routes = sampled_routes.len(),
            raw = raw_count,
            kept = arrivals.len(),
            "pipeline run complete"
        );

        Ok(PipelineOutcome {
            arrivals,
            attempts: sample.attempts,
            sampled_routes,
        })
    }
}
