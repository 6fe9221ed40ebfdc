// Interaction regression: does velocity moderate the effect of technical-debt
// change on funding growth?
//
//   growth = b0 + b1*tdr + b2*velocity + b3*(tdr*velocity)
//          + b4*ln(age+1) + b5*ln(team+1) + b6*round + industry dummies + e
//
// Solved from scratch by the normal equations on the linalg kernel. The
// interaction coefficient b3 carries the hypothesis; its p-value uses a
// t/normal CDF approximation (see distribution.rs), not an exact Student-t.
//
// Key rule: thresholds (minimum sample, b3 > 0.05, p < 0.10) are fixed
// constants, not configuration.

mod design;
mod distribution;
mod ols;
mod verdict;

pub use design::{
    build_design_matrix, CategoricalEncoder, Controls, DesignMatrix, BASE_COLUMNS,
    INTERACTION_INDEX,
};
pub use distribution::{erf, normal_cdf, t_cdf, two_tailed_p_value, NORMAL_APPROX_MIN_DF};
pub use ols::{fit_ols, OlsFit};
pub use verdict::{
    hypothesis_supported, regress, HypothesisVerdict, RegressionResult, INTERACTION_THRESHOLD,
    SIGNIFICANCE_THRESHOLD,
};
