//! The arrival provider abstraction.

use std::future::Future;

use crate::domain::{ArrivalItem, RouteId};
use crate::seoul::{ArrivalFeedError, MockArrivalFeed, SeoulBusClient};

/// Source of live arrivals for one route.
///
/// This abstraction allows the pipeline to run against the live feed,
/// the cached feed, saved responses, or test doubles.
pub trait ArrivalProvider {
    /// Get current arrivals at every station of `route`.
    ///
    /// An empty list means the route has no buses reporting right now.
    fn fetch_route_arrivals(
        &self,
        route: &RouteId,
    ) -> impl Future<Output = Result<Vec<ArrivalItem>, ArrivalFeedError>> + Send;
}

impl ArrivalProvider for SeoulBusClient {
    async fn fetch_route_arrivals(
        &self,
        route: &RouteId,
    ) -> Result<Vec<ArrivalItem>, ArrivalFeedError> {
        self.get_route_arrivals(route).await
    }
}

impl ArrivalProvider for MockArrivalFeed {
    async fn fetch_route_arrivals(
        &self,
        route: &RouteId,
    ) -> Result<Vec<ArrivalItem>, ArrivalFeedError> {
        self.get_route_arrivals(route).await
    }
}
