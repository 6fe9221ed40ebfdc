use crate::records::QualitySnapshot;

/// Sub-score caps; each metric is capped then divided by its cap
pub const TDR_CAP: f64 = 2.0;
pub const COMPLEXITY_DENSITY_CAP: f64 = 100.0;
pub const DUPLICATION_CAP: f64 = 50.0;
pub const ISSUE_DENSITY_CAP: f64 = 200.0;

fn normalized(value: f64, cap: f64) -> f64 {
    value.min(cap) / cap
}

/// Mean of the four capped, normalized sub-scores (lower is better)
///
/// Used for segmentation only; never a regressor.
pub fn composite_quality_score(snapshot: &QualitySnapshot) -> f64 {
    (normalized(snapshot.technical_debt_ratio, TDR_CAP)
        + normalized(snapshot.complexity_density, COMPLEXITY_DENSITY_CAP)
        + normalized(snapshot.duplication_percent, DUPLICATION_CAP)
        + normalized(snapshot.issue_density, ISSUE_DENSITY_CAP))
        / 4.0
}
