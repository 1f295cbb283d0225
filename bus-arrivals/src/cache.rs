//! Caching layer for arrival feed responses.
//!
//! Sampling is with replacement and failed samples are redrawn, so the
//! same route is often requested several times within one run. A short
//! TTL keeps repeated requests off the API while arrivals stay fresh.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{ArrivalItem, RouteId};
use crate::pipeline::ArrivalProvider;
use crate::seoul::ArrivalFeedError;

/// Cached arrivals for one route.
type RouteEntry = Arc<Vec<ArrivalItem>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 512,
        }
    }
}

/// Arrival provider with caching.
///
/// Wraps any provider and caches successful responses per route.
/// Failures are never cached.
pub struct CachedArrivalFeed<P> {
    inner: P,
    routes: MokaCache<RouteId, RouteEntry>,
}

impl<P: ArrivalProvider> CachedArrivalFeed<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, routes }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
    }
}

impl<P> ArrivalProvider for CachedArrivalFeed<P>
where
    P: ArrivalProvider + Sync,
{
    /// Concurrent misses for the same route share one upstream request.
    async fn fetch_route_arrivals(
        &self,
        route: &RouteId,
    ) -> Result<Vec<ArrivalItem>, ArrivalFeedError> {
        let entry = self
            .routes
            .try_get_with(route.clone(), async {
                trace!(route = %route, "arrival cache miss");
                self.inner.fetch_route_arrivals(route).await.map(Arc::new)
            })
            .await
            .map_err(unshare_error)?;

        Ok(entry.as_ref().clone())
    }
}

/// Recover an owned error from one shared between coalesced callers.
///
/// `reqwest::Error` cannot be cloned, so a still-shared HTTP error is
/// reported as an API error carrying the same status and message.
fn unshare_error(shared: Arc<ArrivalFeedError>) -> ArrivalFeedError {
    let shared = match Arc::try_unwrap(shared) {
        Ok(err) => return err,
        Err(shared) => shared,
    };

    match shared.as_ref() {
        ArrivalFeedError::Http(e) => ArrivalFeedError::Api {
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
            message: e.to_string(),
        },
        ArrivalFeedError::Xml { message, body } => ArrivalFeedError::Xml {
            message: message.clone(),
            body: body.clone(),
        },
        ArrivalFeedError::Api { status, message } => ArrivalFeedError::Api {
            status: *status,
            message: message.clone(),
        },
        ArrivalFeedError::RateLimited => ArrivalFeedError::RateLimited,
        ArrivalFeedError::Unauthorized => ArrivalFeedError::Unauthorized,
        ArrivalFeedError::NotConfigured(msg) => ArrivalFeedError::NotConfigured(msg.clone()),
        ArrivalFeedError::MockData(msg) => ArrivalFeedError::MockData(msg.clone()),
    }
}
