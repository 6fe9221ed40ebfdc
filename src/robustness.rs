//! Robustness suite: the interaction regression re-run on variant samples
//!
//! Each variant keeps the design (TDR change, velocity, controls) and alters
//! either the dependent variable or the rows:
//!
//! - **log**: `y' = ln(max(0.1, y + 100))`
//! - **winsorized**: `y` clamped to the 5th/95th positional percentiles
//! - **outliers excluded**: rows with `|tdr_change| > 1.5` dropped and the
//!   controls re-derived; fewer than 10 remaining rows reuses the primary fit
//! - **placebo** (optional): `y` shuffled with a seeded RNG
//!
//! Percentile bounds are always computed on the sample being fitted.

use crate::regression::{regress, Controls, RegressionResult};
use crate::sample::{Observation, MIN_CORRELATION_SAMPLE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub const LOG_SHIFT: f64 = 100.0;
pub const LOG_FLOOR: f64 = 0.1;
pub const WINSOR_LOWER: f64 = 0.05;
pub const WINSOR_UPPER: f64 = 0.95;
/// Rows with `|tdr_change|` above this are outliers
pub const OUTLIER_TDR_LIMIT: f64 = 1.5;
/// Below this many remaining rows the outlier variant reuses the primary fit
pub const MIN_OUTLIER_EXCLUDED_SAMPLE: usize = MIN_CORRELATION_SAMPLE;

/// Results of every robustness variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustnessChecks {
    pub log_transformed: RegressionResult,
    pub winsorized: RegressionResult,
    pub outliers_excluded: RegressionResult,
    /// Rows dropped by the outlier filter
    pub outliers_dropped: usize,
    pub placebo: Option<RegressionResult>,
    /// Log, winsorized and outlier-excluded interactions share the primary sign
    pub interaction_sign_stable: bool,
}

/// `ln(max(0.1, y + 100))` for every value
pub fn log_transform(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|y| (y + LOG_SHIFT).max(LOG_FLOOR).ln())
        .collect()
}

/// Positional 5th/95th percentile bounds: `sorted[floor(n*0.05)]` and
/// `sorted[floor(n*0.95)]`, clamped to the last index
pub fn winsor_bounds(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let lower = ((n as f64 * WINSOR_LOWER).floor() as usize).min(n - 1);
    let upper = ((n as f64 * WINSOR_UPPER).floor() as usize).min(n - 1);
    Some((sorted[lower], sorted[upper]))
}

/// Clamp every value into its own sample's percentile bounds
pub fn winsorize(values: &[f64]) -> Vec<f64> {
    match winsor_bounds(values) {
        Some((lower, upper)) => values.iter().map(|v| v.clamp(lower, upper)).collect(),
        None => Vec::new(),
    }
}

/// Observations with `|tdr_change| <= 1.5`
pub fn exclude_outliers(observations: &[Observation]) -> Vec<Observation> {
    observations
        .iter()
        .filter(|o| o.tdr_change.abs() <= OUTLIER_TDR_LIMIT)
        .cloned()
        .collect()
}

/// Deterministic permutation of `values` for a given seed
pub fn placebo_shuffle(values: &[f64], seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut shuffled = values.to_vec();
    shuffled.shuffle(&mut rng);
    shuffled
}

fn same_sign(a: f64, b: f64) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

/// Run every variant against `observations`
///
/// `primary` is the regression already fitted on the same observations; it
/// is reused for the outlier variant when too few rows survive the filter.
/// `placebo_seed` of `None` skips the placebo variant.
pub fn robustness_checks(
    observations: &[Observation],
    primary: &RegressionResult,
    placebo_seed: Option<u64>,
) -> RobustnessChecks {
    let tdr: Vec<f64> = observations.iter().map(|o| o.tdr_change).collect();
    let velocity: Vec<f64> = observations.iter().map(|o| o.composite_velocity).collect();
    let growth: Vec<f64> = observations.iter().map(|o| o.funding_growth_rate).collect();
    let controls = Controls::from_observations(observations);

    let log_transformed = regress(&tdr, &velocity, &log_transform(&growth), &controls);
    let winsorized = regress(&tdr, &velocity, &winsorize(&growth), &controls);

    let kept = exclude_outliers(observations);
    let outliers_dropped = observations.len() - kept.len();
    let outliers_excluded = if kept.len() < MIN_OUTLIER_EXCLUDED_SAMPLE {
        tracing::debug!(
            remaining = kept.len(),
            "Too few rows after outlier exclusion, reusing primary fit"
        );
        primary.clone()
    } else {
        let kept_tdr: Vec<f64> = kept.iter().map(|o| o.tdr_change).collect();
        let kept_velocity: Vec<f64> = kept.iter().map(|o| o.composite_velocity).collect();
        let kept_growth: Vec<f64> = kept.iter().map(|o| o.funding_growth_rate).collect();
        regress(
            &kept_tdr,
            &kept_velocity,
            &kept_growth,
            &Controls::from_observations(&kept),
        )
    };

    let placebo = placebo_seed
        .map(|seed| regress(&tdr, &velocity, &placebo_shuffle(&growth, seed), &controls));

    let reference = primary.interaction_coefficient;
    let interaction_sign_stable = primary.is_fitted()
        && [&log_transformed, &winsorized, &outliers_excluded]
            .iter()
            .all(|variant| same_sign(variant.interaction_coefficient, reference));

    tracing::debug!(
        outliers_dropped,
        interaction_sign_stable,
        placebo = placebo.is_some(),
        "Robustness checks complete"
    );

    RobustnessChecks {
        log_transformed,
        winsorized,
        outliers_excluded,
        outliers_dropped,
        placebo,
        interaction_sign_stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{interaction_sample, noise, split};
    use crate::segmentation::median;

    /// Positive TDR changes and growths, interaction-driven
    fn positive_sample() -> Vec<Observation> {
        let n = 30;
        interaction_sample(n)
            .into_iter()
            .enumerate()
            .map(|(i, mut obs)| {
                obs.tdr_change = 0.05 + 0.8 * ((i * 7) % n) as f64 / n as f64;
                obs.funding_growth_rate = 20.0
                    + 10.0 * obs.tdr_change
                    + 3.0 * obs.composite_velocity
                    + 30.0 * obs.tdr_change * obs.composite_velocity
                    + 2.0 * noise(i);
                obs
            })
            .collect()
    }

    fn primary_for(observations: &[Observation]) -> RegressionResult {
        let (tdr, velocity, growth, controls) = split(observations);
        regress(&tdr, &velocity, &growth, &controls)
    }

    #[test]
    fn test_log_transform_floor() {
        let out = log_transform(&[0.0, -100.0, -250.0]);
        assert!((out[0] - 100.0_f64.ln()).abs() < 1e-12);
        assert!((out[1] - 0.1_f64.ln()).abs() < 1e-12);
        assert!((out[2] - 0.1_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_winsor_bounds_are_positional() {
        let values: Vec<f64> = (0..20).rev().map(|v| v as f64).collect();
        // floor(20*0.05) = 1, floor(20*0.95) = 19
        assert_eq!(winsor_bounds(&values), Some((1.0, 19.0)));
        assert_eq!(winsor_bounds(&[]), None);
        assert_eq!(winsor_bounds(&[7.0]), Some((7.0, 7.0)));
    }

    #[test]
    fn test_winsorize_keeps_median_and_bounds() {
        let mut values: Vec<f64> = (0..40).map(|i| noise(i) * 10.0).collect();
        values[3] = 500.0;
        values[17] = -800.0;
        let (lower, upper) = winsor_bounds(&values).unwrap();
        let clamped = winsorize(&values);

        assert_eq!(clamped.len(), values.len());
        assert!(clamped.iter().all(|v| (lower..=upper).contains(v)));
        assert_eq!(median(&clamped), median(&values));
        assert!(clamped[3] < 500.0);
        assert!(clamped[17] > -800.0);
    }

    #[test]
    fn test_exclude_outliers() {
        let mut sample = interaction_sample(10);
        sample[0].tdr_change = 1.6;
        sample[1].tdr_change = -2.0;
        sample[2].tdr_change = 1.5;
        let kept = exclude_outliers(&sample);
        assert_eq!(kept.len(), 8);
        assert!(kept.iter().all(|o| o.tdr_change.abs() <= OUTLIER_TDR_LIMIT));
    }

    #[test]
    fn test_placebo_shuffle_is_seeded_permutation() {
        let values: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let a = placebo_shuffle(&values, 42);
        let b = placebo_shuffle(&values, 42);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(sorted, values);
    }

    #[test]
    fn test_log_variant_keeps_direction_on_positive_sample() {
        let sample = positive_sample();
        assert!(sample.iter().all(|o| o.tdr_change > 0.0));
        assert!(sample.iter().all(|o| o.funding_growth_rate > 0.0));

        let primary = primary_for(&sample);
        let checks = robustness_checks(&sample, &primary, None);

        assert!(primary.interaction_coefficient > 0.0);
        assert!(checks.log_transformed.interaction_coefficient > 0.0);
        assert!(checks.winsorized.interaction_coefficient > 0.0);
        assert!(checks.interaction_sign_stable);
        assert!(checks.placebo.is_none());
    }

    #[test]
    fn test_no_outliers_refits_identically() {
        let sample = positive_sample();
        let primary = primary_for(&sample);
        let checks = robustness_checks(&sample, &primary, None);
        assert_eq!(checks.outliers_dropped, 0);
        assert_eq!(
            checks.outliers_excluded.interaction_coefficient,
            primary.interaction_coefficient
        );
    }

    #[test]
    fn test_outlier_variant_reuses_primary_when_too_few_remain() {
        let mut sample = interaction_sample(25);
        for obs in sample.iter_mut().skip(9) {
            obs.tdr_change = 1.9;
        }
        let primary = primary_for(&sample);
        let checks = robustness_checks(&sample, &primary, None);
        assert_eq!(checks.outliers_dropped, 16);
        assert_eq!(checks.outliers_excluded, primary);
    }

    #[test]
    fn test_outlier_variant_refits_reduced_sample() {
        let mut sample = interaction_sample(30);
        sample[0].tdr_change = 4.0;
        sample[1].tdr_change = -3.0;
        let primary = primary_for(&sample);
        let checks = robustness_checks(&sample, &primary, None);
        assert_eq!(checks.outliers_dropped, 2);
        assert_eq!(checks.outliers_excluded.n, 28);
        assert!(checks.outliers_excluded.is_fitted());
    }

    #[test]
    fn test_placebo_runs_when_seeded() {
        let sample = interaction_sample(25);
        let primary = primary_for(&sample);
        let checks = robustness_checks(&sample, &primary, Some(42));
        let placebo = checks.placebo.expect("placebo requested");
        assert_eq!(placebo.n, 25);
        assert!(placebo.is_fitted());
    }

    #[test]
    fn test_unfitted_primary_is_never_stable() {
        let sample = interaction_sample(12);
        let primary = primary_for(&sample);
        let checks = robustness_checks(&sample, &primary, Some(1));
        assert!(!primary.is_fitted());
        assert!(!checks.interaction_sign_stable);
        assert!(!checks.log_transformed.is_fitted());
    }
}
