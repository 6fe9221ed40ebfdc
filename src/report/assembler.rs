use crate::config::AnalysisConfig;
use crate::correlation::{rank_pairwise, standard_metrics, RankedCorrelation};
use crate::records::Dataset;
use crate::regression::{regress, Controls, RegressionResult};
use crate::report::demo::demo_report;
use crate::report::findings::key_findings;
use crate::report::fingerprint::sample_fingerprint;
use crate::report::summary::{summarize, SummaryStatistics};
use crate::robustness::{robustness_checks, RobustnessChecks};
use crate::sample::{
    assemble_sample, IndustryClassifier, InMemorySource, Observation, Sample,
    MIN_CORRELATION_SAMPLE,
};
use crate::segmentation::{
    quartile_analysis, quintile_analysis, strategic_matrix, QuantileBucket, StrategicMatrix,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Whether a report was computed or is the canned fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    Live,
    Demo,
}

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub mode: ReportMode,
    /// Hex SHA-256 of the valid sample (live reports with fingerprinting on)
    pub fingerprint: Option<String>,
    pub summary: SummaryStatistics,
    pub strategic_matrix: StrategicMatrix,
    pub regression: RegressionResult,
    /// Absent in demo reports
    pub robustness: Option<RobustnessChecks>,
    pub velocity_quartiles: Vec<QuantileBucket>,
    pub tdr_quartiles: Vec<QuantileBucket>,
    pub quality_quintiles: Vec<QuantileBucket>,
    pub top_correlations: Vec<RankedCorrelation>,
    pub key_findings: Vec<String>,
}

impl ResearchReport {
    pub fn is_demo(&self) -> bool {
        self.mode == ReportMode::Demo
    }
}

struct InferenceBranch {
    regression: RegressionResult,
    robustness: RobustnessChecks,
}

struct SegmentationBranch {
    strategic_matrix: StrategicMatrix,
    velocity_quartiles: Vec<QuantileBucket>,
    tdr_quartiles: Vec<QuantileBucket>,
    quality_quintiles: Vec<QuantileBucket>,
    top_correlations: Vec<RankedCorrelation>,
}

fn run_inference(valid: &[Observation], placebo_seed: Option<u64>) -> InferenceBranch {
    let tdr: Vec<f64> = valid.iter().map(|o| o.tdr_change).collect();
    let velocity: Vec<f64> = valid.iter().map(|o| o.composite_velocity).collect();
    let growth: Vec<f64> = valid.iter().map(|o| o.funding_growth_rate).collect();
    let regression = regress(&tdr, &velocity, &growth, &Controls::from_observations(valid));
    let robustness = robustness_checks(valid, &regression, placebo_seed);
    InferenceBranch {
        regression,
        robustness,
    }
}

/// Segmentation runs on the valid sample; the pairwise ranking is purely
/// descriptive and sees every assembled row
fn run_segmentation(sample: &Sample) -> SegmentationBranch {
    let valid = &sample.valid;
    SegmentationBranch {
        strategic_matrix: strategic_matrix(valid),
        velocity_quartiles: quartile_analysis(valid, |o| o.composite_velocity),
        tdr_quartiles: quartile_analysis(valid, |o| o.tdr_change),
        quality_quintiles: quintile_analysis(valid),
        top_correlations: rank_pairwise(&standard_metrics(&sample.all)),
    }
}

/// Run both branches, concurrently when `parallel` is set
fn run_branches(
    sample: &Sample,
    placebo_seed: Option<u64>,
    parallel: bool,
) -> (InferenceBranch, SegmentationBranch) {
    let valid = &sample.valid;
    if !parallel {
        return (run_inference(valid, placebo_seed), run_segmentation(sample));
    }

    let joined = crossbeam::thread::scope(|scope| {
        let inference = scope.spawn(|_| run_inference(valid, placebo_seed));
        let segmentation = run_segmentation(sample);
        (inference.join(), segmentation)
    });

    match joined {
        Ok((Ok(inference), segmentation)) => (inference, segmentation),
        _ => {
            tracing::warn!("Inference branch panicked; re-running sequentially");
            (run_inference(valid, placebo_seed), run_segmentation(sample))
        }
    }
}

/// Build the live report for an assembled sample
///
/// Falls back to [`demo_report`] when fewer than
/// [`MIN_CORRELATION_SAMPLE`] observations are valid.
pub fn report_from_sample(sample: &Sample, config: &AnalysisConfig) -> ResearchReport {
    if sample.valid.len() < MIN_CORRELATION_SAMPLE {
        tracing::info!(
            valid = sample.valid.len(),
            required = MIN_CORRELATION_SAMPLE,
            "Valid sample too small, returning demo report"
        );
        return demo_report();
    }

    let valid = &sample.valid;
    let (inference, segmentation) = run_branches(sample, config.placebo.seed(), config.parallel);

    let mut report = ResearchReport {
        mode: ReportMode::Live,
        fingerprint: config.fingerprint.then(|| sample_fingerprint(valid)),
        summary: summarize(sample),
        strategic_matrix: segmentation.strategic_matrix,
        regression: inference.regression,
        robustness: Some(inference.robustness),
        velocity_quartiles: segmentation.velocity_quartiles,
        tdr_quartiles: segmentation.tdr_quartiles,
        quality_quintiles: segmentation.quality_quintiles,
        top_correlations: segmentation.top_correlations,
        key_findings: Vec::new(),
    };
    report.key_findings = key_findings(&report);

    tracing::info!(
        valid = valid.len(),
        supported = report.regression.hypothesis_supported,
        "Assembled live report"
    );
    report
}

/// Assemble a report with an explicit industry classifier
///
/// Never fails: an empty velocity dataset or too small a valid sample
/// yields the demo report.
pub fn assemble_report_with(
    dataset: &Dataset,
    classifier: &IndustryClassifier,
    config: &AnalysisConfig,
) -> ResearchReport {
    if dataset.velocity_periods.is_empty() {
        tracing::info!("No velocity periods, returning demo report");
        return demo_report();
    }

    let source = InMemorySource::new(dataset);
    let sample = assemble_sample(
        &dataset.velocity_periods,
        &source,
        classifier,
        config.fetch_workers,
    );
    report_from_sample(&sample, config)
}

/// Assemble a report, loading industry rules from `config`
///
/// # Errors
/// Only when the configured industry rules cannot be loaded; the analysis
/// itself always produces a report.
///
/// # Example
/// ```
/// use debtlens::config::AnalysisConfig;
/// use debtlens::records::Dataset;
/// use debtlens::report::assemble_report;
///
/// let report = assemble_report(&Dataset::default(), &AnalysisConfig::default())?;
/// assert!(report.is_demo());
/// assert_eq!(report.summary.total_companies, 42);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn assemble_report(dataset: &Dataset, config: &AnalysisConfig) -> Result<ResearchReport> {
    let classifier = match &config.industry_rules {
        Some(path) => IndustryClassifier::from_toml(path)?,
        None => IndustryClassifier::default_rules()?,
    };
    Ok(assemble_report_with(dataset, &classifier, config))
}
