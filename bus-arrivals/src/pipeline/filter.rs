//! The "arriving soon" filter.

use crate::domain::{ArrivalItem, FilteredArrival};

/// Status message for a bus still waiting at its origin stop.
pub const DEPARTURE_PENDING: &str = "출발대기";

/// Default ETA threshold: five minutes.
const DEFAULT_ETA_THRESHOLD_SECS: u32 = 300;

/// Which arrivals count as "arriving soon".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Both buses must arrive strictly sooner than this.
    pub eta_threshold_secs: u32,

    /// First-bus messages that disqualify an entry.
    pub excluded_messages: Vec<String>,
}

impl FilterPolicy {
    /// Whether `item` passes the policy.
    pub fn accepts(&self, item: &ArrivalItem) -> bool {
        item.first_eta_secs < self.eta_threshold_secs
            && item.second_eta_secs < self.eta_threshold_secs
            && !self
                .excluded_messages
                .iter()
                .any(|m| m.trim() == item.first_arrival_message.trim())
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            eta_threshold_secs: DEFAULT_ETA_THRESHOLD_SECS,
            excluded_messages: vec![DEPARTURE_PENDING.to_string()],
        }
    }
}

/// Keep the entries `policy` accepts, in input order.
pub fn filter_soon_arrivals(items: Vec<ArrivalItem>, policy: &FilterPolicy) -> Vec<FilteredArrival> {
    items
        .into_iter()
        .filter(|item| policy.accepts(item))
        .map(FilteredArrival::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::item;

    #[test]
    fn keeps_only_items_with_both_buses_soon() {
        let items = vec![item("A", 100, 200, "운행중"), item("B", 100, 400, "운행중")];

        let kept = filter_soon_arrivals(items, &FilterPolicy::default());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].item().bus_number, "A");
    }

    #[test]
    fn threshold_is_exclusive() {
        let policy = FilterPolicy::default();
        assert!(policy.accepts(&item("A", 299, 299, "")));
        assert!(!policy.accepts(&item("A", 300, 10, "")));
        assert!(!policy.accepts(&item("A", 10, 300, "")));
    }

    #[test]
    fn departure_pending_excluded() {
        let policy = FilterPolicy::default();
        assert!(!policy.accepts(&item("A", 0, 0, DEPARTURE_PENDING)));
        assert!(!policy.accepts(&item("A", 0, 0, " 출발대기 ")));
        assert!(policy.accepts(&item("A", 0, 0, "곧 도착")));
    }

    #[test]
    fn preserves_input_order() {
        let items = vec![
            item("C", 250, 280, ""),
            item("X", 999, 999, ""),
            item("A", 10, 20, ""),
            item("B", 150, 160, ""),
        ];

        let kept: Vec<String> = filter_soon_arrivals(items, &FilterPolicy::default())
            .into_iter()
            .map(|f| f.into_item().bus_number)
            .collect();

        assert_eq!(kept, vec!["C", "A", "B"]);
    }

    #[test]
    fn custom_policy() {
        let policy = FilterPolicy {
            eta_threshold_secs: 120,
            excluded_messages: vec![DEPARTURE_PENDING.to_string(), "운행종료".to_string()],
        };

        assert!(policy.accepts(&item("A", 60, 119, "")));
        assert!(!policy.accepts(&item("A", 60, 200, "")));
        assert!(!policy.accepts(&item("A", 0, 0, "운행종료")));
    }

    #[test]
    fn empty_input() {
        assert!(filter_soon_arrivals(Vec::new(), &FilterPolicy::default()).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::test_support::item;
    use proptest::prelude::*;

    fn message() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(DEPARTURE_PENDING.to_string()),
            Just("운행중".to_string()),
            Just("곧 도착".to_string()),
            Just(String::new()),
        ]
    }

    fn items_strategy() -> impl Strategy<Value = Vec<ArrivalItem>> {
        prop::collection::vec(
            (0u32..900, 0u32..900, message()).prop_map(|(a, b, m)| item("X", a, b, &m)),
            0..30,
        )
    }

    proptest! {
        /// Every kept item satisfies the predicate.
        #[test]
        fn kept_items_satisfy_predicate(items in items_strategy()) {
            for f in filter_soon_arrivals(items, &FilterPolicy::default()) {
                let i = f.item();
                prop_assert!(i.first_eta_secs < 300);
                prop_assert!(i.second_eta_secs < 300);
                prop_assert_ne!(i.first_arrival_message.as_str(), DEPARTURE_PENDING);
            }
        }

        /// Nothing that satisfies the predicate is dropped.
        #[test]
        fn filter_is_exact(items in items_strategy()) {
            let policy = FilterPolicy::default();
            let expected = items.iter().filter(|i| policy.accepts(i)).count();
            prop_assert_eq!(filter_soon_arrivals(items, &policy).len(), expected);
        }
    }
}
