//! Property-based tests for the gradation computations.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::gradation::{
        MASS_BALANCE_TOLERANCE_PERCENT, compute_gradation, compute_mass_balance,
    };
    use crate::types::{GradationTest, SieveEntry};
    use proptest::prelude::*;

    fn arb_entry() -> impl Strategy<Value = SieveEntry> {
        (0.01f64..100.0, 0.0f64..500.0).prop_map(|(opening_mm, retained_mass)| SieveEntry {
            name: format!("{opening_mm:.3}mm"),
            opening_mm,
            retained_mass,
        })
    }

    fn arb_test() -> impl Strategy<Value = GradationTest> {
        (1.0f64..5000.0, prop::collection::vec(arb_entry(), 0..24))
            .prop_map(|(total_mass, entries)| GradationTest::new(total_mass, entries))
    }

    proptest! {
        #[test]
        fn test_passing_non_increasing_with_opening(test in arb_test()) {
            let results = compute_gradation(&test).unwrap();
            for pair in results.windows(2) {
                prop_assert!(pair[0].opening_mm >= pair[1].opening_mm);
                prop_assert!(pair[0].percent_passing >= pair[1].percent_passing);
            }
        }

        #[test]
        fn test_passing_bounded(test in arb_test()) {
            for row in compute_gradation(&test).unwrap() {
                prop_assert!((0.0..=100.0).contains(&row.percent_passing));
            }
        }

        #[test]
        fn test_gradation_idempotent(test in arb_test()) {
            let first = compute_gradation(&test).unwrap();
            let second = compute_gradation(&test).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_gradation_preserves_cardinality(test in arb_test()) {
            prop_assert_eq!(compute_gradation(&test).unwrap().len(), test.len());
        }

        #[test]
        fn test_mass_balance_sign_and_tolerance(test in arb_test()) {
            let check = compute_mass_balance(&test).unwrap();
            let diff = test.sum_retained() - test.total_mass;
            if diff > 0.0 {
                prop_assert!(check.error_percent > 0.0);
            } else if diff < 0.0 {
                prop_assert!(check.error_percent < 0.0);
            }
            prop_assert_eq!(
                check.within_tolerance,
                check.error_percent.abs() <= MASS_BALANCE_TOLERANCE_PERCENT
            );
        }
    }
}
