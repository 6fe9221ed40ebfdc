//! Comprehensive property-based tests
//!
//! Covers the invariants every run of the engine must hold, whatever the
//! sample:
//! 1. Pearson correlation bounds and degenerate inputs
//! 2. Matrix inverse of the identity and of well-conditioned matrices
//! 3. Winsorization bounds and median
//! 4. Strategic and quartile partitions
//! 5. Regression sample-size guard and p-value range

use debtlens::correlation::{pearson, rank_pairwise, NamedMetric};
use debtlens::linalg::{invert, multiply, Matrix};
use debtlens::regression::{regress, Controls};
use debtlens::robustness::{log_transform, winsor_bounds, winsorize};
use debtlens::sample::{Observation, MIN_REGRESSION_SAMPLE};
use debtlens::segmentation::{median, quartile_analysis, strategic_matrix};
use proptest::prelude::*;

fn observation(tdr_change: f64, composite_velocity: f64, growth: f64) -> Observation {
    Observation {
        period_id: 0,
        company_id: 0,
        from_round_id: None,
        to_round_id: None,
        period_days: 365,
        tdr_change,
        composite_velocity,
        development_speed: 0.0,
        commit_velocity: 0.0,
        code_churn: 0.0,
        author_activity: 1.0,
        funding_growth_rate: growth,
        got_next_round: growth > 0.0,
        company_age_months: 24.0,
        team_size: 3.0,
        industry: "infrastructure".to_string(),
        round_number: 2,
        quality_score: None,
    }
}

fn observations() -> impl Strategy<Value = Vec<Observation>> {
    prop::collection::vec((-1.9f64..1.9, 0.01f64..5.0, -50.0f64..1000.0), 0..60).prop_map(|rows| {
        rows.into_iter()
            .map(|(t, v, g)| observation(t, v, g))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_pearson_is_bounded(
        pairs in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 2..50),
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let r = pearson(&x, &y);
        prop_assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn prop_pearson_self_is_one(x in prop::collection::vec(-1e3f64..1e3, 2..50)) {
        let spread = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
            - x.iter().cloned().fold(f64::INFINITY, f64::min);
        prop_assume!(spread > 1e-6);
        prop_assert!((pearson(&x, &x) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_pearson_constant_is_zero(
        x in prop::collection::vec(-1e3f64..1e3, 2..50),
        c in -1000i32..1000,
    ) {
        let constant = vec![f64::from(c); x.len()];
        prop_assert_eq!(pearson(&x, &constant), 0.0);
        prop_assert_eq!(pearson(&constant, &x), 0.0);
    }

    #[test]
    fn prop_ranking_is_sorted_and_capped(
        columns in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 12), 2..8),
    ) {
        const NAMES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let metrics: Vec<NamedMetric> = columns
            .into_iter()
            .zip(NAMES)
            .map(|(values, name)| NamedMetric { name, values })
            .collect();
        let ranked = rank_pairwise(&metrics);
        prop_assert!(ranked.len() <= 10);
        prop_assert!(ranked.iter().all(|c| c.r.abs() > 0.1));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].r.abs() >= pair[1].r.abs());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_identity_inverse(n in 1usize..12) {
        let identity = Matrix::identity(n);
        prop_assert_eq!(invert(&identity).unwrap(), identity);
    }

    #[test]
    fn prop_diagonally_dominant_inverse(
        n in 1usize..8,
        entries in prop::collection::vec(-1.0f64..1.0, 64),
    ) {
        // Diagonal dominance keeps the matrix well conditioned
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { n as f64 + 1.0 } else { entries[i * 8 + j] })
                    .collect()
            })
            .collect();
        let m = Matrix::from_rows(&rows).unwrap();
        let product = multiply(&m, &invert(&m).unwrap()).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                prop_assert!((product.get(i, j) - expected).abs() < 1e-6);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_winsorize_bounds_and_median(values in prop::collection::vec(-1e4f64..1e4, 1..80)) {
        let (lower, upper) = winsor_bounds(&values).unwrap();
        let clamped = winsorize(&values);
        prop_assert_eq!(clamped.len(), values.len());
        prop_assert!(clamped.iter().all(|v| *v >= lower && *v <= upper));
        prop_assert_eq!(median(&clamped), median(&values));
    }

    #[test]
    fn prop_log_transform_is_finite(values in prop::collection::vec(-1e6f64..1e6, 0..40)) {
        prop_assert!(log_transform(&values).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn prop_strategic_matrix_partitions(sample in observations()) {
        let matrix = strategic_matrix(&sample);
        prop_assert_eq!(matrix.buckets.len(), 4);
        let counted: usize = matrix.buckets.iter().map(|b| b.count).sum();
        prop_assert_eq!(counted, sample.len());
    }

    #[test]
    fn prop_quartiles_partition_in_order(sample in observations()) {
        let quartiles = quartile_analysis(&sample, |o| o.composite_velocity);
        let counted: usize = quartiles.iter().map(|q| q.count).sum();
        prop_assert_eq!(counted, sample.len());

        let filled: Vec<_> = quartiles.iter().filter(|q| q.count > 0).collect();
        for pair in filled.windows(2) {
            prop_assert!(pair[0].metric_max <= pair[1].metric_min);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_regression_guard_and_p_range(sample in observations()) {
        let tdr: Vec<f64> = sample.iter().map(|o| o.tdr_change).collect();
        let velocity: Vec<f64> = sample.iter().map(|o| o.composite_velocity).collect();
        let growth: Vec<f64> = sample.iter().map(|o| o.funding_growth_rate).collect();
        let result = regress(&tdr, &velocity, &growth, &Controls::from_observations(&sample));

        prop_assert!((0.0..=1.0).contains(&result.p_value));
        if sample.len() < MIN_REGRESSION_SAMPLE {
            prop_assert_eq!(result.p_value, 1.0);
            prop_assert_eq!(result.interaction_coefficient, 0.0);
            prop_assert!(result.standard_errors.is_empty());
        }
    }
}
