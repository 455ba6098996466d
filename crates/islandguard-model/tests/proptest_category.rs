// SPDX-License-Identifier: Apache-2.0

use islandguard_model::Category;
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn classification_is_total_and_monotonic(a in -1000.0_f64..1000.0, b in -1000.0_f64..1000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low_band = Category::from_resilience_index(lo);
        let high_band = Category::from_resilience_index(hi);
        prop_assert!(low_band <= high_band, "bands must be monotonic in the index");
    }

    #[test]
    fn classification_is_deterministic(index in -1000.0_f64..1000.0) {
        prop_assert_eq!(
            Category::from_resilience_index(index),
            Category::from_resilience_index(index)
        );
    }
}
