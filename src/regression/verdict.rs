// Moderation-hypothesis verdict
//
// Fits the interaction model and applies the fixed decision rule:
//   supported  <=>  beta_3 > 0.05  AND  p(beta_3) < 0.10
// Samples below the minimum size are never fitted; they get a zeroed result
// with p = 1 ("no evidence").

use crate::regression::design::{build_design_matrix, Controls, INTERACTION_INDEX};
use crate::regression::distribution::two_tailed_p_value;
use crate::regression::ols::fit_ols;
use crate::sample::MIN_REGRESSION_SAMPLE;
use serde::{Deserialize, Serialize};

/// Interaction coefficient must exceed this for support
pub const INTERACTION_THRESHOLD: f64 = 0.05;

/// Interaction p-value must be below this for support
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.10;

/// Outcome of the moderation hypothesis test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HypothesisVerdict {
    /// Positive, significant interaction
    Supported,
    /// Model fitted but the decision rule failed
    NotSupported,
    /// Model not fitted
    InsufficientData { reason: String },
}

/// Coefficients and significance of the interaction model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub n: usize,
    /// Residual degrees of freedom
    pub df: usize,
    pub intercept: f64,
    pub tdr_coefficient: f64,
    pub velocity_coefficient: f64,
    pub interaction_coefficient: f64,
    /// p-value of the interaction coefficient
    pub p_value: f64,
    pub r_squared: f64,
    pub adjusted_r_squared: f64,
    /// Full coefficient vector in design-column order (empty when not fitted)
    pub coefficients: Vec<f64>,
    pub column_names: Vec<String>,
    pub standard_errors: Vec<f64>,
    pub t_statistics: Vec<f64>,
    pub hypothesis_supported: bool,
    pub verdict: HypothesisVerdict,
}

impl RegressionResult {
    /// Zeroed result: no coefficients, p = 1
    pub fn insufficient(n: usize, reason: impl Into<String>) -> Self {
        Self {
            n,
            df: 0,
            intercept: 0.0,
            tdr_coefficient: 0.0,
            velocity_coefficient: 0.0,
            interaction_coefficient: 0.0,
            p_value: 1.0,
            r_squared: 0.0,
            adjusted_r_squared: 0.0,
            coefficients: Vec::new(),
            column_names: Vec::new(),
            standard_errors: Vec::new(),
            t_statistics: Vec::new(),
            hypothesis_supported: false,
            verdict: HypothesisVerdict::InsufficientData {
                reason: reason.into(),
            },
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.coefficients.is_empty()
    }

    /// One-line description of the interaction estimate
    pub fn summary_line(&self) -> String {
        match &self.verdict {
            HypothesisVerdict::InsufficientData { reason } => {
                format!("not estimated ({})", reason)
            }
            _ => format!(
                "beta3={:.4} p={:.4} R2={:.3} n={}",
                self.interaction_coefficient, self.p_value, self.r_squared, self.n
            ),
        }
    }
}

/// Decision rule for the moderation hypothesis
pub fn hypothesis_supported(interaction: f64, p_value: f64) -> bool {
    interaction > INTERACTION_THRESHOLD && p_value < SIGNIFICANCE_THRESHOLD
}

/// Regress funding growth on TDR change, velocity, their product and controls
///
/// Never fails: short samples, mismatched inputs and saturated designs come
/// back as [`RegressionResult::insufficient`].
///
/// # Example
/// ```
/// use debtlens::regression::{regress, Controls};
///
/// let result = regress(&[0.1; 5], &[1.0; 5], &[3.0; 5], &Controls::default());
/// assert_eq!(result.p_value, 1.0);
/// assert!(result.standard_errors.is_empty());
/// ```
pub fn regress(
    tdr_changes: &[f64],
    velocities: &[f64],
    funding_growths: &[f64],
    controls: &Controls,
) -> RegressionResult {
    let n = funding_growths.len();
    if n < MIN_REGRESSION_SAMPLE {
        return RegressionResult::insufficient(
            n,
            format!("{} observations, need at least {}", n, MIN_REGRESSION_SAMPLE),
        );
    }

    let design = match build_design_matrix(tdr_changes, velocities, controls) {
        Ok(design) => design,
        Err(e) => {
            tracing::warn!("Failed to build design matrix: {}", e);
            return RegressionResult::insufficient(n, e.to_string());
        }
    };

    let fit = match fit_ols(&design.matrix, funding_growths) {
        Ok(fit) => fit,
        Err(e) => {
            tracing::warn!("Failed to fit regression: {}", e);
            return RegressionResult::insufficient(n, e.to_string());
        }
    };

    let interaction = fit.coefficients[INTERACTION_INDEX];
    let p_value = two_tailed_p_value(fit.t_statistics[INTERACTION_INDEX], fit.df as f64);
    let supported = hypothesis_supported(interaction, p_value);

    tracing::debug!(
        n,
        columns = design.column_names.len(),
        interaction,
        p_value,
        r_squared = fit.r_squared,
        "Fitted interaction model"
    );

    RegressionResult {
        n,
        df: fit.df,
        intercept: fit.coefficients[0],
        tdr_coefficient: fit.coefficients[1],
        velocity_coefficient: fit.coefficients[2],
        interaction_coefficient: interaction,
        p_value,
        r_squared: fit.r_squared,
        adjusted_r_squared: fit.adjusted_r_squared,
        coefficients: fit.coefficients,
        column_names: design.column_names,
        standard_errors: fit.standard_errors,
        t_statistics: fit.t_statistics,
        hypothesis_supported: supported,
        verdict: if supported {
            HypothesisVerdict::Supported
        } else {
            HypothesisVerdict::NotSupported
        },
    }
}
