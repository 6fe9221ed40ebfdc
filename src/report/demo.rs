// Demo report returned when there is nothing to analyze
//
// DEMO_FIXTURE is a fixed, illustrative result. It is a contract of the
// report assembler: an empty velocity dataset (or fewer than ten valid
// rows) always yields exactly this report. Only derived values (shares,
// t-statistics, the interaction p-value, the verdict) are computed when the
// fixture is expanded, through the same functions a live run uses.

use crate::correlation::{CorrelationStrength, RankedCorrelation};
use crate::regression::{
    hypothesis_supported, two_tailed_p_value, HypothesisVerdict, RegressionResult,
    INTERACTION_INDEX,
};
use crate::report::assembler::{ReportMode, ResearchReport};
use crate::report::findings::key_findings;
use crate::report::summary::{IndustryCount, SummaryStatistics};
use crate::segmentation::{BucketSummary, QuantileBucket, StrategicBucket, StrategicMatrix};

pub struct DemoSummary {
    pub total_companies: usize,
    pub total_periods: usize,
    pub valid_observations: usize,
    pub mean_tdr_change: f64,
    pub stddev_tdr_change: f64,
    pub mean_velocity: f64,
    pub mean_funding_growth: f64,
    pub median_funding_growth: f64,
    pub success_rate: f64,
    pub tdr_growth_correlation: f64,
    pub velocity_growth_correlation: f64,
    pub industries: &'static [(&'static str, usize)],
}

pub struct DemoQuadrant {
    pub bucket: StrategicBucket,
    pub count: usize,
    pub mean_funding_growth: f64,
    pub success_rate: f64,
}

pub struct DemoColumn {
    pub name: &'static str,
    pub coefficient: f64,
    pub standard_error: f64,
}

pub struct DemoRegression {
    pub n: usize,
    pub r_squared: f64,
    pub columns: &'static [DemoColumn],
}

pub struct DemoBucket {
    pub label: &'static str,
    pub count: usize,
    pub metric_min: f64,
    pub metric_max: f64,
    pub mean_metric: f64,
    pub mean_funding_growth: f64,
    pub mean_tdr_change: f64,
    pub mean_velocity: f64,
    pub success_rate: f64,
}

pub struct DemoFixture {
    pub summary: DemoSummary,
    pub tdr_median: f64,
    pub velocity_median: f64,
    pub quadrants: [DemoQuadrant; 4],
    pub regression: DemoRegression,
    pub velocity_quartiles: &'static [DemoBucket],
    pub tdr_quartiles: &'static [DemoBucket],
    pub quality_quintiles: &'static [DemoBucket],
    pub correlations: &'static [(&'static str, &'static str, f64)],
}

#[allow(clippy::too_many_arguments)]
const fn bucket(
    label: &'static str,
    count: usize,
    range: (f64, f64),
    mean_metric: f64,
    mean_funding_growth: f64,
    mean_tdr_change: f64,
    mean_velocity: f64,
    success_rate: f64,
) -> DemoBucket {
    DemoBucket {
        label,
        count,
        metric_min: range.0,
        metric_max: range.1,
        mean_metric,
        mean_funding_growth,
        mean_tdr_change,
        mean_velocity,
        success_rate,
    }
}

const fn column(name: &'static str, coefficient: f64, standard_error: f64) -> DemoColumn {
    DemoColumn {
        name,
        coefficient,
        standard_error,
    }
}

pub const DEMO_FIXTURE: DemoFixture = DemoFixture {
    summary: DemoSummary {
        total_companies: 42,
        total_periods: 118,
        valid_observations: 87,
        mean_tdr_change: 0.034,
        stddev_tdr_change: 0.187,
        mean_velocity: 1.42,
        mean_funding_growth: 38.6,
        median_funding_growth: 22.5,
        success_rate: 0.46,
        tdr_growth_correlation: -0.12,
        velocity_growth_correlation: 0.31,
        industries: &[
            ("infrastructure", 29),
            ("ai/ml", 21),
            ("database", 17),
            ("devtools/cli", 12),
            ("web/frontend", 8),
        ],
    },
    tdr_median: 0.118,
    velocity_median: 1.31,
    quadrants: [
        DemoQuadrant {
            bucket: StrategicBucket::SpeedStrategy,
            count: 24,
            mean_funding_growth: 61.2,
            success_rate: 0.58,
        },
        DemoQuadrant {
            bucket: StrategicBucket::TechnicalChaos,
            count: 20,
            mean_funding_growth: 12.4,
            success_rate: 0.30,
        },
        DemoQuadrant {
            bucket: StrategicBucket::EngineeringExcellence,
            count: 23,
            mean_funding_growth: 48.9,
            success_rate: 0.57,
        },
        DemoQuadrant {
            bucket: StrategicBucket::OverEngineering,
            count: 20,
            mean_funding_growth: 18.3,
            success_rate: 0.35,
        },
    ],
    regression: DemoRegression {
        n: 87,
        r_squared: 0.31,
        columns: &[
            column("intercept", 14.2, 9.8),
            column("tdr_change", -18.7, 11.2),
            column("velocity", 9.4, 3.1),
            column("tdr_x_velocity", 12.6, 5.4),
            column("ln_company_age", 3.1, 2.6),
            column("ln_team_size", 6.8, 3.9),
            column("round_number", -2.4, 2.2),
            column("industry[infrastructure]", 4.1, 6.3),
            column("industry[ai/ml]", 8.7, 6.9),
            column("industry[database]", 2.2, 7.4),
            column("industry[devtools/cli]", -1.9, 8.1),
            column("industry[web/frontend]", 0.0, 0.0),
        ],
    },
    velocity_quartiles: &[
        bucket("Q1", 22, (0.21, 0.84), 0.58, 9.7, 0.051, 0.58, 0.32),
        bucket("Q2", 22, (0.86, 1.29), 1.08, 27.4, 0.029, 1.08, 0.41),
        bucket("Q3", 22, (1.33, 1.87), 1.57, 44.1, 0.036, 1.57, 0.50),
        bucket("Q4", 21, (1.91, 3.65), 2.49, 74.8, 0.019, 2.49, 0.62),
    ],
    tdr_quartiles: &[
        bucket("Q1", 22, (-0.48, -0.09), -0.21, 41.3, -0.21, 1.51, 0.50),
        bucket("Q2", 22, (-0.08, 0.02), -0.03, 36.9, -0.03, 1.44, 0.45),
        bucket("Q3", 22, (0.03, 0.14), 0.08, 40.2, 0.08, 1.39, 0.50),
        bucket("Q4", 21, (0.15, 0.71), 0.31, 35.8, 0.31, 1.33, 0.38),
    ],
    quality_quintiles: &[
        bucket("Highest Quality", 12, (0.08, 0.17), 0.13, 52.6, -0.02, 1.61, 0.58),
        bucket("High Quality", 12, (0.18, 0.24), 0.21, 44.0, 0.01, 1.49, 0.50),
        bucket("Medium Quality", 12, (0.25, 0.31), 0.28, 37.1, 0.03, 1.40, 0.50),
        bucket("Low Quality", 12, (0.32, 0.40), 0.36, 30.9, 0.06, 1.35, 0.42),
        bucket("Lowest Quality", 12, (0.41, 0.63), 0.49, 21.5, 0.09, 1.22, 0.33),
    ],
    correlations: &[
        ("Development Speed", "Commit Velocity", 0.78),
        ("Composite Velocity", "Development Speed", 0.71),
        ("Composite Velocity", "Commit Velocity", 0.66),
        ("Commit Velocity", "Author Activity", 0.52),
        ("Composite Velocity", "Funding Growth", 0.31),
        ("Funding Growth", "Next Round", 0.29),
        ("Code Churn", "TDR Change", 0.18),
        ("TDR Change", "Funding Growth", -0.12),
    ],
};

fn expand_summary(fixture: &DemoFixture) -> SummaryStatistics {
    let s = &fixture.summary;
    SummaryStatistics {
        total_companies: s.total_companies,
        total_periods: s.total_periods,
        valid_observations: s.valid_observations,
        excluded_observations: s.total_periods - s.valid_observations,
        mean_tdr_change: s.mean_tdr_change,
        stddev_tdr_change: s.stddev_tdr_change,
        mean_velocity: s.mean_velocity,
        mean_funding_growth: s.mean_funding_growth,
        median_funding_growth: s.median_funding_growth,
        success_rate: s.success_rate,
        tdr_growth_correlation: s.tdr_growth_correlation,
        velocity_growth_correlation: s.velocity_growth_correlation,
        industries: s
            .industries
            .iter()
            .map(|(industry, count)| IndustryCount {
                industry: (*industry).to_string(),
                count: *count,
            })
            .collect(),
    }
}

fn expand_matrix(fixture: &DemoFixture) -> StrategicMatrix {
    let total: usize = fixture.quadrants.iter().map(|q| q.count).sum();
    StrategicMatrix {
        tdr_median: fixture.tdr_median,
        velocity_median: fixture.velocity_median,
        total,
        buckets: fixture
            .quadrants
            .iter()
            .map(|q| BucketSummary {
                bucket: q.bucket,
                count: q.count,
                share: q.count as f64 / total as f64,
                mean_funding_growth: q.mean_funding_growth,
                success_rate: q.success_rate,
            })
            .collect(),
    }
}

fn expand_regression(fixture: &DemoRegression) -> RegressionResult {
    let p = fixture.columns.len();
    let df = fixture.n - p;
    let coefficients: Vec<f64> = fixture.columns.iter().map(|c| c.coefficient).collect();
    let standard_errors: Vec<f64> = fixture.columns.iter().map(|c| c.standard_error).collect();
    let t_statistics: Vec<f64> = fixture
        .columns
        .iter()
        .map(|c| {
            if c.standard_error == 0.0 {
                0.0
            } else {
                c.coefficient / c.standard_error
            }
        })
        .collect();

    let interaction = coefficients[INTERACTION_INDEX];
    let p_value = two_tailed_p_value(t_statistics[INTERACTION_INDEX], df as f64);
    let supported = hypothesis_supported(interaction, p_value);

    RegressionResult {
        n: fixture.n,
        df,
        intercept: coefficients[0],
        tdr_coefficient: coefficients[1],
        velocity_coefficient: coefficients[2],
        interaction_coefficient: interaction,
        p_value,
        r_squared: fixture.r_squared,
        adjusted_r_squared: 1.0 - (1.0 - fixture.r_squared) * (fixture.n - 1) as f64 / df as f64,
        column_names: fixture.columns.iter().map(|c| c.name.to_string()).collect(),
        coefficients,
        standard_errors,
        t_statistics,
        hypothesis_supported: supported,
        verdict: if supported {
            HypothesisVerdict::Supported
        } else {
            HypothesisVerdict::NotSupported
        },
    }
}

fn expand_buckets(buckets: &[DemoBucket]) -> Vec<QuantileBucket> {
    buckets
        .iter()
        .map(|b| QuantileBucket {
            label: b.label.to_string(),
            count: b.count,
            metric_min: b.metric_min,
            metric_max: b.metric_max,
            mean_metric: b.mean_metric,
            mean_funding_growth: b.mean_funding_growth,
            mean_tdr_change: b.mean_tdr_change,
            mean_velocity: b.mean_velocity,
            success_rate: b.success_rate,
        })
        .collect()
}

/// The fixed fallback report
pub fn demo_report() -> ResearchReport {
    let fixture = &DEMO_FIXTURE;
    let mut report = ResearchReport {
        mode: ReportMode::Demo,
        fingerprint: None,
        summary: expand_summary(fixture),
        strategic_matrix: expand_matrix(fixture),
        regression: expand_regression(&fixture.regression),
        robustness: None,
        velocity_quartiles: expand_buckets(fixture.velocity_quartiles),
        tdr_quartiles: expand_buckets(fixture.tdr_quartiles),
        quality_quintiles: expand_buckets(fixture.quality_quintiles),
        top_correlations: fixture
            .correlations
            .iter()
            .map(|(a, b, r)| RankedCorrelation {
                metric_a: (*a).to_string(),
                metric_b: (*b).to_string(),
                r: *r,
                strength: CorrelationStrength::from_r(*r),
            })
            .collect(),
        key_findings: Vec::new(),
    };
    report.key_findings = key_findings(&report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_is_deterministic() {
        assert_eq!(demo_report(), demo_report());
    }

    #[test]
    fn test_demo_counts_agree() {
        let report = demo_report();
        assert_eq!(report.summary.total_companies, 42);
        assert_eq!(report.summary.valid_observations, 87);
        assert_eq!(report.strategic_matrix.total, 87);
        let industries: usize = report.summary.industries.iter().map(|i| i.count).sum();
        assert_eq!(industries, 87);
        let quartiles: usize = report.velocity_quartiles.iter().map(|q| q.count).sum();
        assert_eq!(quartiles, 87);
        assert_eq!(report.regression.n, 87);
    }

    #[test]
    fn test_demo_regression_is_consistent() {
        let regression = demo_report().regression;
        assert_eq!(regression.df, 75);
        assert_eq!(regression.column_names[INTERACTION_INDEX], "tdr_x_velocity");
        // t = 12.6 / 5.4 under the normal approximation
        assert!((regression.p_value - 0.0196).abs() < 0.002);
        assert!(regression.hypothesis_supported);
    }

    #[test]
    fn test_demo_correlations_are_ranked() {
        let correlations = demo_report().top_correlations;
        assert!(correlations.len() <= 10);
        for pair in correlations.windows(2) {
            assert!(pair[0].r.abs() >= pair[1].r.abs());
        }
    }
}
