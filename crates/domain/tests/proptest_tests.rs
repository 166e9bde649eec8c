//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::entities::Departure;
use domain::value_objects::{DirectionFilter, StopId, TimeWindow};
use proptest::prelude::*;

// ============================================================================
// TimeWindow Property Tests
// ============================================================================

mod time_window_tests {
    use super::*;

    proptest! {
        #[test]
        fn positive_minutes_create_window(minutes in 1i64..=100_000i64) {
            let window = TimeWindow::new(minutes);
            prop_assert!(window.is_ok());
            prop_assert_eq!(i64::from(window.unwrap().minutes()), minutes);
        }

        #[test]
        fn non_positive_minutes_rejected(minutes in i64::MIN..=0i64) {
            prop_assert!(TimeWindow::new(minutes).is_err());
        }

        #[test]
        fn contains_is_strictly_less_than(
            minutes in 1i64..=1_000i64,
            left in -10i64..=2_000i64
        ) {
            let window = TimeWindow::new(minutes).unwrap();
            prop_assert_eq!(window.contains(left), left < minutes);
        }
    }
}

// ============================================================================
// StopId Property Tests
// ============================================================================

mod stop_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn trimmed_value_is_kept(id in "[A-Za-z0-9:]{1,24}", pad in " {0,4}") {
            let stop = StopId::new(format!("{pad}{id}{pad}")).unwrap();
            prop_assert_eq!(stop.as_str(), id.as_str());
        }

        #[test]
        fn whitespace_only_rejected(blank in "[ \t\n]{0,8}") {
            prop_assert!(StopId::new(blank).is_err());
        }
    }
}

// ============================================================================
// DirectionFilter / Departure Property Tests
// ============================================================================

mod departure_tests {
    use super::*;

    proptest! {
        #[test]
        fn empty_filter_matches_any_destination(destination in ".*") {
            prop_assert!(DirectionFilter::new("").matches(&destination));
        }

        #[test]
        fn destination_matches_itself(destination in "[A-Za-z ]{1,20}") {
            prop_assume!(!destination.trim().is_empty());
            let filter = DirectionFilter::new(destination.clone());
            prop_assert!(filter.matches(&destination.to_uppercase()));
        }

        #[test]
        fn summary_contains_all_parts(
            left in 0i64..120,
            kind in "[A-Za-z]{1,10}",
            line in "[0-9A-Z]{1,4}",
            to in "[A-Za-z ]{1,20}"
        ) {
            let departure = Departure {
                left,
                delay: 0,
                kind: kind.clone(),
                line: line.clone(),
                to: to.clone(),
                from: String::new(),
            };
            let summary = departure.summary();
            let expected_prefix = format!("({left} min) ");
            prop_assert!(summary.starts_with(&expected_prefix));
            prop_assert!(summary.contains(&kind));
            prop_assert!(summary.contains(&line));
            let expected_suffix = format!("({to})");
            prop_assert!(summary.ends_with(&expected_suffix));
        }
    }
}
