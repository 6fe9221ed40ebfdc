use crate::correlation::pearson;
use crate::sample::{Observation, Sample};
use aprender::stats::DescriptiveStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trueno::Vector;

/// Observations per industry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryCount {
    pub industry: String,
    pub count: usize,
}

/// Headline statistics over the valid sample
///
/// Means, the TDR stddev and the median growth are computed in `f32`
/// (trueno/aprender), so large growth rates carry roughly 1e-4 absolute
/// error. Correlations are computed in `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Distinct companies contributing a valid observation
    pub total_companies: usize,
    /// Velocity periods assembled, valid or not
    pub total_periods: usize,
    pub valid_observations: usize,
    pub excluded_observations: usize,
    pub mean_tdr_change: f64,
    pub stddev_tdr_change: f64,
    pub mean_velocity: f64,
    pub mean_funding_growth: f64,
    pub median_funding_growth: f64,
    /// Share of valid observations that reached a next round
    pub success_rate: f64,
    pub tdr_growth_correlation: f64,
    pub velocity_growth_correlation: f64,
    /// Largest industry first, ties by name
    pub industries: Vec<IndustryCount>,
}

fn to_f32(values: impl Iterator<Item = f64>) -> Vec<f32> {
    values.map(|v| v as f32).collect()
}

/// Mean and population standard deviation, zeros for empty input
fn mean_and_stddev(values: &[f32]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let v = Vector::from_slice(values);
    let mean = v.mean().unwrap_or(0.0);
    let stddev = if values.len() >= 2 {
        v.stddev().unwrap_or(0.0)
    } else {
        0.0
    };
    (f64::from(mean), f64::from(stddev))
}

fn median(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let v = Vector::from_slice(values);
    match DescriptiveStats::new(&v).quantile(0.5) {
        Ok(m) => f64::from(m),
        Err(e) => {
            tracing::warn!("Failed to compute median: {}", e);
            0.0
        }
    }
}

fn industry_counts(observations: &[Observation]) -> Vec<IndustryCount> {
    let mut counts: Vec<IndustryCount> = observations
        .iter()
        .fold(
            fnv::FnvHashMap::<&str, usize>::default(),
            |mut acc, obs| {
                *acc.entry(obs.industry.as_str()).or_insert(0) += 1;
                acc
            },
        )
        .into_iter()
        .map(|(industry, count)| IndustryCount {
            industry: industry.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.industry.cmp(&b.industry)));
    counts
}

/// Summarize an assembled sample
pub fn summarize(sample: &Sample) -> SummaryStatistics {
    let valid = &sample.valid;
    let tdr: Vec<f64> = valid.iter().map(|o| o.tdr_change).collect();
    let velocity: Vec<f64> = valid.iter().map(|o| o.composite_velocity).collect();
    let growth: Vec<f64> = valid.iter().map(|o| o.funding_growth_rate).collect();

    let (mean_tdr_change, stddev_tdr_change) = mean_and_stddev(&to_f32(tdr.iter().copied()));
    let (mean_velocity, _) = mean_and_stddev(&to_f32(velocity.iter().copied()));
    let growth_f32 = to_f32(growth.iter().copied());
    let (mean_funding_growth, _) = mean_and_stddev(&growth_f32);

    let companies: BTreeSet<i64> = valid.iter().map(|o| o.company_id).collect();
    let successes = valid.iter().filter(|o| o.got_next_round).count();

    SummaryStatistics {
        total_companies: companies.len(),
        total_periods: sample.all.len(),
        valid_observations: valid.len(),
        excluded_observations: sample.excluded(),
        mean_tdr_change,
        stddev_tdr_change,
        mean_velocity,
        mean_funding_growth,
        median_funding_growth: median(&growth_f32),
        success_rate: if valid.is_empty() {
            0.0
        } else {
            successes as f64 / valid.len() as f64
        },
        tdr_growth_correlation: pearson(&tdr, &growth),
        velocity_growth_correlation: pearson(&velocity, &growth),
        industries: industry_counts(valid),
    }
}
