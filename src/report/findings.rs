// Templated key-finding sentences
//
// Each finding is chosen from a fixed pair of templates by one numeric
// condition; nothing here computes new statistics.

use crate::regression::HypothesisVerdict;
use crate::report::assembler::ResearchReport;

fn hypothesis_finding(report: &ResearchReport) -> String {
    let r = &report.regression;
    match &r.verdict {
        HypothesisVerdict::Supported => format!(
            "Development velocity moderates the effect of technical-debt change on funding \
             growth: the interaction is positive and significant (beta3 = {:.3}, p = {:.3}).",
            r.interaction_coefficient, r.p_value
        ),
        HypothesisVerdict::NotSupported => format!(
            "No significant moderating effect of velocity was found (beta3 = {:.3}, p = {:.3}); \
             the hypothesis is not supported by this sample.",
            r.interaction_coefficient, r.p_value
        ),
        HypothesisVerdict::InsufficientData { reason } => {
            format!("The interaction model was not estimated: {}.", reason)
        }
    }
}

fn strategic_finding(report: &ResearchReport) -> Option<String> {
    let best = report.strategic_matrix.best_by_success_rate()?;
    Some(format!(
        "{} companies show the highest next-round success rate ({:.0}% across {} periods).",
        best.bucket,
        best.success_rate * 100.0,
        best.count
    ))
}

fn velocity_finding(report: &ResearchReport) -> Option<String> {
    let (first, last) = (
        report.velocity_quartiles.first()?,
        report.velocity_quartiles.last()?,
    );
    if first.count == 0 || last.count == 0 {
        return None;
    }
    let delta = (last.success_rate - first.success_rate) * 100.0;
    Some(if delta >= 0.0 {
        format!(
            "The fastest velocity quartile raises its next-round rate by {:.0} points over the slowest.",
            delta
        )
    } else {
        format!(
            "The fastest velocity quartile trails the slowest by {:.0} points in next-round rate.",
            -delta
        )
    })
}

fn correlation_finding(report: &ResearchReport) -> Option<String> {
    let top = report.top_correlations.first()?;
    Some(format!(
        "Strongest pairwise relationship: {} vs {} (r = {:.2}, {}).",
        top.metric_a, top.metric_b, top.r, top.strength
    ))
}

fn robustness_finding(report: &ResearchReport) -> Option<String> {
    let checks = report.robustness.as_ref()?;
    if !report.regression.is_fitted() {
        return None;
    }
    Some(if checks.interaction_sign_stable {
        "The interaction keeps its sign under log, winsorized and outlier-excluded variants."
            .to_string()
    } else {
        "The interaction changes sign under at least one robustness variant; treat it with caution."
            .to_string()
    })
}

/// Key findings for a report, in display order
pub fn key_findings(report: &ResearchReport) -> Vec<String> {
    std::iter::once(Some(hypothesis_finding(report)))
        .chain([
            robustness_finding(report),
            strategic_finding(report),
            velocity_finding(report),
            correlation_finding(report),
        ])
        .flatten()
        .collect()
}
