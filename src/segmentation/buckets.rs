use crate::sample::Observation;
use crate::segmentation::accumulator::BucketAccumulator;
use serde::{Deserialize, Serialize};

/// Quintile labels in ascending composite-score order (lower score is better)
pub const QUINTILE_LABELS: [&str; 5] = [
    "Highest Quality",
    "High Quality",
    "Medium Quality",
    "Low Quality",
    "Lowest Quality",
];

/// One positional bucket of a sorted sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileBucket {
    pub label: String,
    pub count: usize,
    /// Range and mean of the metric the sample was sorted by
    pub metric_min: f64,
    pub metric_max: f64,
    pub mean_metric: f64,
    pub mean_funding_growth: f64,
    pub mean_tdr_change: f64,
    pub mean_velocity: f64,
    pub success_rate: f64,
}

impl QuantileBucket {
    fn from_accumulator(label: String, acc: &BucketAccumulator) -> Self {
        let (metric_min, metric_max) = acc.metric_range();
        Self {
            label,
            count: acc.count,
            metric_min,
            metric_max,
            mean_metric: acc.mean_metric(),
            mean_funding_growth: acc.mean_growth(),
            mean_tdr_change: acc.mean_tdr(),
            mean_velocity: acc.mean_velocity(),
            success_rate: acc.success_rate(),
        }
    }
}

/// Stable ascending sort by `metric`
fn sorted_by<'a>(
    observations: &'a [Observation],
    metric: &dyn Fn(&Observation) -> f64,
) -> Vec<(&'a Observation, f64)> {
    let mut keyed: Vec<(&Observation, f64)> =
        observations.iter().map(|o| (o, metric(o))).collect();
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
    keyed
}

/// Quartile index of sorted position `i` in a sample of `n`: `floor(i / n * 4)`
pub fn quartile_index(i: usize, n: usize) -> usize {
    (i * 4 / n).min(3)
}

/// Four index-proportional buckets over `observations` sorted by `metric`
///
/// Boundaries are positional, so equal metric values may straddle buckets;
/// the stable sort keeps input order among ties. Empty input yields no
/// buckets; a tiny sample may leave some of the four empty.
pub fn quartile_analysis(
    observations: &[Observation],
    metric: impl Fn(&Observation) -> f64,
) -> Vec<QuantileBucket> {
    if observations.is_empty() {
        return Vec::new();
    }

    let keyed = sorted_by(observations, &metric);
    let n = keyed.len();
    let totals = keyed.iter().enumerate().fold(
        [BucketAccumulator::default(); 4],
        |mut acc, (i, (obs, value))| {
            let q = quartile_index(i, n);
            acc[q] = acc[q].absorb(obs, *value);
            acc
        },
    );

    totals
        .iter()
        .enumerate()
        .map(|(q, acc)| QuantileBucket::from_accumulator(format!("Q{}", q + 1), acc))
        .collect()
}

/// Five fixed-size slices over observations with a quality score, best first
///
/// Slice size is `floor(n / 5)` and the last slice takes the remainder.
/// Fewer than five scored observations yields no quintiles.
pub fn quintile_analysis(observations: &[Observation]) -> Vec<QuantileBucket> {
    let scored: Vec<Observation> = observations
        .iter()
        .filter(|o| o.quality_score.is_some())
        .cloned()
        .collect();
    let size = scored.len() / 5;
    if size == 0 {
        return Vec::new();
    }

    let keyed = sorted_by(&scored, &|o: &Observation| o.quality_score.unwrap_or(0.0));
    QUINTILE_LABELS
        .iter()
        .enumerate()
        .map(|(q, label)| {
            let start = q * size;
            let end = if q == QUINTILE_LABELS.len() - 1 {
                keyed.len()
            } else {
                start + size
            };
            let acc = keyed[start..end]
                .iter()
                .fold(BucketAccumulator::default(), |acc, (obs, score)| {
                    acc.absorb(obs, *score)
                });
            QuantileBucket::from_accumulator((*label).to_string(), &acc)
        })
        .collect()
}
