//! Pearson correlation and exhaustive pairwise ranking
//!
//! Degenerate input (length mismatch, fewer than two points, zero variance,
//! non-finite values) always yields `0.0`, never `NaN`.

use crate::sample::Observation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pairs at or below this absolute correlation are dropped from the ranking
pub const RANKING_MIN_ABS_R: f64 = 0.1;

/// Number of ranked pairs reported
pub const RANKING_TOP_N: usize = 10;

/// Pearson product-moment correlation
///
/// # Example
/// ```
/// use debtlens::correlation::pearson;
///
/// assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
/// assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), 0.0);
/// ```
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return 0.0;
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    let r = sxy / denominator;
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Qualitative label for `|r|`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    VeryStrong,
    Strong,
    Moderate,
    Weak,
    VeryWeak,
}

impl CorrelationStrength {
    pub fn from_r(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude >= 0.7 {
            Self::VeryStrong
        } else if magnitude >= 0.5 {
            Self::Strong
        } else if magnitude >= 0.3 {
            Self::Moderate
        } else if magnitude >= 0.1 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryStrong => "Very Strong",
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
            Self::VeryWeak => "Very Weak",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named metric column
#[derive(Debug, Clone)]
pub struct NamedMetric {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// One entry of the pairwise ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCorrelation {
    pub metric_a: String,
    pub metric_b: String,
    pub r: f64,
    pub strength: CorrelationStrength,
}

/// Ordered metric set used for the pairwise ranking
pub fn standard_metrics(observations: &[Observation]) -> Vec<NamedMetric> {
    let column = |name: &'static str, f: fn(&Observation) -> f64| NamedMetric {
        name,
        values: observations.iter().map(f).collect(),
    };

    vec![
        column("TDR Change", |o| o.tdr_change),
        column("Composite Velocity", |o| o.composite_velocity),
        column("Development Speed", |o| o.development_speed),
        column("Commit Velocity", |o| o.commit_velocity),
        column("Code Churn", |o| o.code_churn),
        column("Author Activity", |o| o.author_activity),
        column("Funding Growth", |o| o.funding_growth_rate),
        column("Period Days", |o| f64::from(o.period_days)),
        column("Next Round", Observation::success),
    ]
}

/// All `C(k, 2)` pairs with `|r| > 0.1`, strongest first, top 10
///
/// Pairs keep metric-list order within the pair; ties in `|r|` keep
/// enumeration order.
pub fn rank_pairwise(metrics: &[NamedMetric]) -> Vec<RankedCorrelation> {
    let mut pairs = Vec::new();
    for (i, a) in metrics.iter().enumerate() {
        for b in &metrics[i + 1..] {
            let r = pearson(&a.values, &b.values);
            if r.abs() > RANKING_MIN_ABS_R {
                pairs.push(RankedCorrelation {
                    metric_a: a.name.to_string(),
                    metric_b: b.name.to_string(),
                    r,
                    strength: CorrelationStrength::from_r(r),
                });
            }
        }
    }

    pairs.sort_by(|x, y| y.r.abs().total_cmp(&x.r.abs()));
    pairs.truncate(RANKING_TOP_N);
    pairs
}
