//! Cross-route merge and ETA ranking.

use crate::domain::{FilteredArrival, RankedArrival};

/// Merge per-route filtered arrivals and rank them by first-bus ETA.
///
/// Routes are concatenated in the order given, then sorted ascending by
/// ETA with a stable sort: arrivals with equal ETAs keep their
/// concatenation order. There is no secondary key.
pub fn merge_and_rank(per_route: Vec<Vec<FilteredArrival>>) -> Vec<RankedArrival> {
    let mut merged: Vec<FilteredArrival> = per_route.into_iter().flatten().collect();
    merged.sort_by_key(FilteredArrival::eta_secs);
    merged.into_iter().map(RankedArrival::from).collect()
}
