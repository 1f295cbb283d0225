//! Mock arrival feed for running without API access.
//!
//! Loads saved `getArrInfoByRouteAll` responses from XML files and serves
//! them through the same decoder as the live client.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{ArrivalItem, RouteId};

use super::convert::decode_arrivals;
use super::error::ArrivalFeedError;

/// Mock arrival feed that serves data from XML files.
///
/// Routes without a file answer with an empty list, the same as a live
/// route with no buses running.
#[derive(Clone)]
pub struct MockArrivalFeed {
    /// Raw response bodies, keyed by route.
    bodies: Arc<RwLock<HashMap<RouteId, String>>>,
}

impl MockArrivalFeed {
    /// Create a new mock feed by loading XML files from a directory.
    ///
    /// Expects files named `{routeId}.xml` (e.g., `100100118.xml`).
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ArrivalFeedError> {
        let bodies = load_dir(data_dir.as_ref())?;
        Ok(Self {
            bodies: Arc::new(RwLock::new(bodies)),
        })
    }

    /// Create a mock feed from in-memory response bodies.
    pub fn from_bodies(bodies: HashMap<RouteId, String>) -> Self {
        Self {
            bodies: Arc::new(RwLock::new(bodies)),
        }
    }

    /// Get arrivals for a route.
    ///
    /// Mimics `SeoulBusClient::get_route_arrivals`.
    pub async fn get_route_arrivals(
        &self,
        route: &RouteId,
    ) -> Result<Vec<ArrivalItem>, ArrivalFeedError> {
        let bodies = self.bodies.read().await;
        match bodies.get(route) {
            Some(body) => decode_arrivals(route, body),
            None => Ok(Vec::new()),
        }
    }

    /// List routes that have mock data.
    pub async fn available_routes(&self) -> Vec<RouteId> {
        let bodies = self.bodies.read().await;
        bodies.keys().cloned().collect()
    }

    /// Reload mock data from disk (useful for development).
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), ArrivalFeedError> {
        let fresh = load_dir(data_dir.as_ref())?;
        let mut bodies = self.bodies.write().await;
        *bodies = fresh;
        Ok(())
    }
}

fn load_dir(data_dir: &Path) -> Result<HashMap<RouteId, String>, ArrivalFeedError> {
    let mut bodies = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| {
        ArrivalFeedError::MockData(format!("failed to read {}: {}", data_dir.display(), e))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            ArrivalFeedError::MockData(format!("failed to read directory entry: {}", e))
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("xml") {
            continue;
        }

        // "100100118.xml" -> "100100118"
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ArrivalFeedError::MockData(format!("invalid filename: {:?}", path)))?;

        let route = RouteId::parse(stem).map_err(|e| {
            ArrivalFeedError::MockData(format!("invalid route in filename {:?}: {}", path, e))
        })?;

        let body = std::fs::read_to_string(&path).map_err(|e| {
            ArrivalFeedError::MockData(format!("failed to read {:?}: {}", path, e))
        })?;

        bodies.insert(route, body);
    }

    if bodies.is_empty() {
        return Err(ArrivalFeedError::MockData(format!(
            "no mock response files found in {}",
            data_dir.display()
        )));
    }

    Ok(bodies)
}
