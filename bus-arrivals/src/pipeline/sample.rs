//! Random route sampling with bounded retry.
//!
//! Each attempt draws `sample_size` routes with replacement and fetches
//! them all. A sample in which every route came back empty is thrown
//! away and a new one drawn, up to `max_attempts` times.

use futures::future::join_all;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::{ArrivalItem, Route, RouteArrivals, StationCatalog};
use crate::seoul::ArrivalFeedError;

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::provider::ArrivalProvider;

/// A sample that produced data.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Number of samples drawn, including this one.
    pub attempts: usize,

    /// Routes of the accepted sample that returned arrivals, in sample
    /// order. Never empty.
    pub routes: Vec<RouteArrivals>,
}

/// Draw `k` routes independently and uniformly, with replacement.
pub fn select_sample<'c, R: Rng + ?Sized>(
    catalog: &'c StationCatalog,
    k: usize,
    rng: &mut R,
) -> Vec<&'c Route> {
    (0..k).map(|_| catalog.choose(rng)).collect()
}

/// Draw samples until one has at least one route with arrivals.
///
/// Transient fetch failures count as an empty route. Fatal feed errors
/// end the run immediately. Gives up with `NoData` after
/// `config.max_attempts` samples.
pub async fn sample_until_non_empty<P, R>(
    catalog: &StationCatalog,
    config: &PipelineConfig,
    provider: &P,
    rng: &mut R,
) -> Result<Sample, PipelineError>
where
    P: ArrivalProvider,
    R: Rng + ?Sized,
{
    config.validate()?;

    for attempt in 1..=config.max_attempts {
        let sample = select_sample(catalog, config.sample_size, rng);
        debug!(
            attempt,
            routes = ?sample.iter().map(|r| r.route_id.as_str()).collect::<Vec<_>>(),
            "drew route sample"
        );

        let fetched = fetch_sample(provider, &sample, config.concurrent_fetch).await?;
        let routes: Vec<RouteArrivals> = fetched.into_iter().filter(|r| !r.is_empty()).collect();

        if !routes.is_empty() {
            return Ok(Sample {
                attempts: attempt,
                routes,
            });
        }

        info!(
            attempt,
            max_attempts = config.max_attempts,
            "every sampled route was empty, resampling"
        );
    }

    Err(PipelineError::NoData {
        attempts: config.max_attempts,
    })
}

/// Fetch every route of a sample, keeping results paired with routes.
async fn fetch_sample<P: ArrivalProvider>(
    provider: &P,
    sample: &[&Route],
    concurrent: bool,
) -> Result<Vec<RouteArrivals>, ArrivalFeedError> {
    let results: Vec<Result<Vec<ArrivalItem>, ArrivalFeedError>> = if concurrent {
        join_all(
            sample
                .iter()
                .map(|route| provider.fetch_route_arrivals(&route.route_id)),
        )
        .await
    } else {
        let mut results = Vec::with_capacity(sample.len());
        for route in sample {
            results.push(provider.fetch_route_arrivals(&route.route_id).await);
        }
        results
    };

    let mut fetched = Vec::with_capacity(sample.len());
    for (route, result) in sample.iter().zip(results) {
        let items = match result {
            Ok(items) => items,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(route = %route.route_id, error = %e, "fetch failed, treating route as empty");
                Vec::new()
            }
        };
        fetched.push(RouteArrivals::new(route.route_id.clone(), items));
    }

    Ok(fetched)
}
