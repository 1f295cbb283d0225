//! Arrival records at each pipeline stage.
//!
//! `ArrivalItem` is what the feed produces, already typed. The filter
//! wraps accepted items in `FilteredArrival`, and ranking turns those
//! into `RankedArrival`. Only the filter can build a `FilteredArrival`,
//! so ranking never sees an unfiltered item.

use serde::Serialize;

use super::RouteId;

/// One entry in a route's live arrival feed: the next two buses at one
/// station of the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalItem {
    /// Route this entry was fetched for.
    pub route_id: RouteId,

    /// Line label shown to passengers (e.g. "7016").
    pub bus_number: String,

    /// Station identifier.
    pub station_id: String,

    /// Station display name.
    pub station_name: String,

    /// Position of the station along the route, 1-based.
    pub station_order: Option<u32>,

    /// Licence plate of the first upcoming bus.
    pub plate_no: String,

    /// Seconds until the first bus arrives.
    pub first_eta_secs: u32,

    /// Seconds until the second bus arrives.
    pub second_eta_secs: u32,

    /// Status text for the first bus (e.g. "3분후[1번째 전]" or "출발대기").
    pub first_arrival_message: String,

    /// Status text for the second bus.
    pub second_arrival_message: String,
}

/// An arrival that passed the "arriving soon" filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredArrival(ArrivalItem);

impl FilteredArrival {
    /// Only the filter stage constructs these.
    pub(crate) fn new(item: ArrivalItem) -> Self {
        Self(item)
    }

    pub fn item(&self) -> &ArrivalItem {
        &self.0
    }

    pub fn into_item(self) -> ArrivalItem {
        self.0
    }

    /// ETA used as the ranking key.
    pub fn eta_secs(&self) -> u32 {
        self.0.first_eta_secs
    }
}

/// A filtered arrival in its final ranked position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedArrival {
    pub bus_number: String,
    pub plate_no: String,
    pub eta_secs: u32,
    pub station_name: String,
    pub station_id: String,
    pub route_id: RouteId,
    pub arrival_message: String,
}

impl From<FilteredArrival> for RankedArrival {
    fn from(filtered: FilteredArrival) -> Self {
        let item = filtered.into_item();
        Self {
            bus_number: item.bus_number,
            plate_no: item.plate_no,
            eta_secs: item.first_eta_secs,
            station_name: item.station_name,
            station_id: item.station_id,
            route_id: item.route_id,
            arrival_message: item.first_arrival_message,
        }
    }
}

/// Raw arrivals fetched for one route, kept paired with that route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteArrivals {
    pub route: RouteId,
    pub items: Vec<ArrivalItem>,
}

impl RouteArrivals {
    pub fn new(route: RouteId, items: Vec<ArrivalItem>) -> Self {
        Self { route, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::item;
    use super::*;

    #[test]
    fn ranked_arrival_takes_first_bus_fields() {
        let filtered = FilteredArrival::new(item("7016", 120, 280, "2분후[1번째 전]"));
        let ranked = RankedArrival::from(filtered);

        assert_eq!(ranked.bus_number, "7016");
        assert_eq!(ranked.eta_secs, 120);
        assert_eq!(ranked.arrival_message, "2분후[1번째 전]");
        assert_eq!(ranked.route_id.as_str(), "100100118");
    }

    #[test]
    fn ranked_arrival_serializes() {
        let ranked = RankedArrival::from(FilteredArrival::new(item("A", 60, 90, "곧 도착")));
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["bus_number"], "A");
        assert_eq!(json["eta_secs"], 60);
        assert_eq!(json["route_id"], "100100118");
    }

    #[test]
    fn route_arrivals_empty() {
        let route = RouteId::parse("R1").unwrap();
        assert!(RouteArrivals::new(route.clone(), Vec::new()).is_empty());
        assert!(!RouteArrivals::new(route, vec![item("A", 1, 2, "")]).is_empty());
    }
}
