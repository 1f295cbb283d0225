//! Test doubles shared by the pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{ArrivalItem, Route, RouteId, StationCatalog};
use crate::seoul::ArrivalFeedError;

use super::provider::ArrivalProvider;

pub fn route_id(s: &str) -> RouteId {
    RouteId::parse(s).unwrap()
}

pub fn catalog(ids: &[&str]) -> StationCatalog {
    StationCatalog::new(ids.iter().map(|id| Route::new(route_id(id))).collect()).unwrap()
}

/// How a scripted route fails.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Transient,
    Unauthorized,
}

/// Provider answering from fixed per-route data and recording every call.
///
/// Routes with no entry answer with an empty list.
#[derive(Default)]
pub struct ScriptedProvider {
    items: HashMap<RouteId, Vec<ArrivalItem>>,
    failures: HashMap<RouteId, Failure>,
    calls: Mutex<Vec<RouteId>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(mut self, route: &str, items: Vec<ArrivalItem>) -> Self {
        let route = route_id(route);
        let items = items
            .into_iter()
            .map(|mut i| {
                i.route_id = route.clone();
                i
            })
            .collect();
        self.items.insert(route, items);
        self
    }

    pub fn with_failure(mut self, route: &str, failure: Failure) -> Self {
        self.failures.insert(route_id(route), failure);
        self
    }

    pub fn calls(&self) -> Vec<RouteId> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ArrivalProvider for ScriptedProvider {
    async fn fetch_route_arrivals(
        &self,
        route: &RouteId,
    ) -> Result<Vec<ArrivalItem>, ArrivalFeedError> {
        self.calls.lock().unwrap().push(route.clone());

        match self.failures.get(route) {
            Some(Failure::Transient) => Err(ArrivalFeedError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
            Some(Failure::Unauthorized) => Err(ArrivalFeedError::Unauthorized),
            None => Ok(self.items.get(route).cloned().unwrap_or_default()),
        }
    }
}
