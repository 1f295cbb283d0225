//! Route identifiers and route records.

use std::fmt;

use serde::Serialize;

use super::DomainError;

/// Identifier of a bus route as used in feed queries (`busRouteId`).
///
/// The value is opaque to this crate. Construction trims surrounding
/// whitespace and rejects empty input, so any `RouteId` can be sent to
/// the feed as-is.
///
/// # Examples
///
/// ```
/// use bus_arrivals::domain::RouteId;
///
/// let id = RouteId::parse(" 100100118 ").unwrap();
/// assert_eq!(id.as_str(), "100100118");
///
/// assert!(RouteId::parse("").is_err());
/// assert!(RouteId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route ID, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRouteId(s.to_string()));
        }
        Ok(RouteId(trimmed.to_string()))
    }

    /// Returns the route ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station served by a route, as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRef {
    pub id: String,
    pub name: Option<String>,
}

/// A bus route loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Identifier used when querying the arrival feed.
    pub route_id: RouteId,

    /// Line label shown to passengers (e.g. "7016"), when the catalog has one.
    pub name: Option<String>,

    /// Stations served by the route, in catalog order. May be empty.
    pub stations: Vec<StationRef>,
}

impl Route {
    /// Create a route with no name and no station entries.
    pub fn new(route_id: RouteId) -> Self {
        Self {
            route_id,
            name: None,
            stations: Vec::new(),
        }
    }

    /// Set the line label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the station entries.
    pub fn with_stations(mut self, stations: Vec<StationRef>) -> Self {
        self.stations = stations;
        self
    }
}
