use crate::sample::Observation;
use crate::segmentation::accumulator::BucketAccumulator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quadrant of the 2x2 strategic matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategicBucket {
    /// Debt above median, velocity above median
    SpeedStrategy,
    /// Debt above median, velocity at or below median
    TechnicalChaos,
    /// Debt at or below median, velocity above median
    EngineeringExcellence,
    /// Debt at or below median, velocity at or below median
    OverEngineering,
}

impl StrategicBucket {
    pub const ALL: [StrategicBucket; 4] = [
        StrategicBucket::SpeedStrategy,
        StrategicBucket::TechnicalChaos,
        StrategicBucket::EngineeringExcellence,
        StrategicBucket::OverEngineering,
    ];

    pub fn from_position(above_median_tdr: bool, above_median_velocity: bool) -> Self {
        match (above_median_tdr, above_median_velocity) {
            (true, true) => Self::SpeedStrategy,
            (true, false) => Self::TechnicalChaos,
            (false, true) => Self::EngineeringExcellence,
            (false, false) => Self::OverEngineering,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::SpeedStrategy => 0,
            Self::TechnicalChaos => 1,
            Self::EngineeringExcellence => 2,
            Self::OverEngineering => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SpeedStrategy => "Speed Strategy",
            Self::TechnicalChaos => "Technical Chaos",
            Self::EngineeringExcellence => "Engineering Excellence",
            Self::OverEngineering => "Over-Engineering",
        }
    }
}

impl fmt::Display for StrategicBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregates for one quadrant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub bucket: StrategicBucket,
    pub count: usize,
    /// Fraction of the classified sample
    pub share: f64,
    pub mean_funding_growth: f64,
    pub success_rate: f64,
}

/// The strategic matrix for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicMatrix {
    /// Median of `|tdr_change|`
    pub tdr_median: f64,
    pub velocity_median: f64,
    pub total: usize,
    /// Always four entries, in [`StrategicBucket::ALL`] order
    pub buckets: Vec<BucketSummary>,
}

impl StrategicMatrix {
    pub fn get(&self, bucket: StrategicBucket) -> Option<&BucketSummary> {
        self.buckets.iter().find(|b| b.bucket == bucket)
    }

    /// Non-empty quadrant with the highest success rate (first wins ties)
    pub fn best_by_success_rate(&self) -> Option<&BucketSummary> {
        self.buckets
            .iter()
            .filter(|b| b.count > 0)
            .fold(None, |best: Option<&BucketSummary>, b| match best {
                Some(current) if current.success_rate >= b.success_rate => Some(current),
                _ => Some(b),
            })
    }
}

/// Median (mean of the middle pair for even lengths, 0 when empty)
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Quadrant for one observation given the sample medians
pub fn classify(obs: &Observation, tdr_median: f64, velocity_median: f64) -> StrategicBucket {
    StrategicBucket::from_position(
        obs.tdr_change.abs() > tdr_median,
        obs.composite_velocity > velocity_median,
    )
}

/// Median-split every observation into a quadrant and aggregate
///
/// Medians are recomputed from `observations` on every call.
pub fn strategic_matrix(observations: &[Observation]) -> StrategicMatrix {
    let abs_tdr: Vec<f64> = observations.iter().map(|o| o.tdr_change.abs()).collect();
    let velocities: Vec<f64> = observations.iter().map(|o| o.composite_velocity).collect();
    let tdr_median = median(&abs_tdr);
    let velocity_median = median(&velocities);

    let totals = observations.iter().fold(
        [BucketAccumulator::default(); 4],
        |mut acc, obs| {
            let idx = classify(obs, tdr_median, velocity_median).index();
            acc[idx] = acc[idx].absorb(obs, 0.0);
            acc
        },
    );

    let total = observations.len();
    let buckets = StrategicBucket::ALL
        .iter()
        .map(|&bucket| {
            let acc = totals[bucket.index()];
            BucketSummary {
                bucket,
                count: acc.count,
                share: if total == 0 {
                    0.0
                } else {
                    acc.count as f64 / total as f64
                },
                mean_funding_growth: acc.mean_growth(),
                success_rate: acc.success_rate(),
            }
        })
        .collect();

    StrategicMatrix {
        tdr_median,
        velocity_median,
        total,
        buckets,
    }
}
