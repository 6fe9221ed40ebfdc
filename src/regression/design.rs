// Design matrix construction
//
// Column layout (fixed order):
//   [1, tdr, velocity, tdr*velocity, ln(age+1), ln(team+1), round, dummy_1..dummy_k]
//
// k is the number of distinct industries in the current sample, so the
// width changes from run to run. Dummies are ordered by first appearance.

use crate::error::{AnalysisError, Result};
use crate::linalg::Matrix;
use crate::sample::Observation;
use fnv::FnvHashMap;

/// Number of columns before the industry dummies
pub const BASE_COLUMNS: usize = 7;

/// Column index of the TDR x velocity interaction
pub const INTERACTION_INDEX: usize = 3;

/// Per-row control variables, parallel to the dependent variable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    pub company_age_months: Vec<f64>,
    pub team_size: Vec<f64>,
    pub round_number: Vec<f64>,
    pub industry: Vec<String>,
}

impl Controls {
    pub fn from_observations(observations: &[Observation]) -> Self {
        Self {
            company_age_months: observations.iter().map(|o| o.company_age_months).collect(),
            team_size: observations.iter().map(|o| o.team_size).collect(),
            round_number: observations
                .iter()
                .map(|o| f64::from(o.round_number))
                .collect(),
            industry: observations.iter().map(|o| o.industry.clone()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.company_age_months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_lengths(&self, expected: usize) -> Result<()> {
        for actual in [
            self.company_age_months.len(),
            self.team_size.len(),
            self.round_number.len(),
            self.industry.len(),
        ] {
            if actual != expected {
                return Err(AnalysisError::LengthMismatch { expected, actual });
            }
        }
        Ok(())
    }
}

/// One-hot encoder keyed on first-seen order
#[derive(Debug, Clone, Default)]
pub struct CategoricalEncoder {
    levels: Vec<String>,
    index: FnvHashMap<String, usize>,
}

impl CategoricalEncoder {
    pub fn fit(values: &[String]) -> Self {
        let mut encoder = Self::default();
        for value in values {
            if !encoder.index.contains_key(value) {
                encoder.index.insert(value.clone(), encoder.levels.len());
                encoder.levels.push(value.clone());
            }
        }
        encoder
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Write the one-hot encoding of `value` into `out` (unknown levels stay zero)
    pub fn encode_into(&self, value: &str, out: &mut [f64]) {
        out.iter_mut().for_each(|v| *v = 0.0);
        if let Some(&idx) = self.index.get(value) {
            out[idx] = 1.0;
        }
    }
}

/// Design matrix plus human-readable column names
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    pub matrix: Matrix,
    pub column_names: Vec<String>,
}

/// Build the design matrix for `tdr`, `velocity` and `controls`
///
/// # Errors
/// `LengthMismatch` when the inputs are not all the same length.
pub fn build_design_matrix(tdr: &[f64], velocity: &[f64], controls: &Controls) -> Result<DesignMatrix> {
    let n = tdr.len();
    if velocity.len() != n {
        return Err(AnalysisError::LengthMismatch {
            expected: n,
            actual: velocity.len(),
        });
    }
    controls.check_lengths(n)?;

    let encoder = CategoricalEncoder::fit(&controls.industry);
    let k = encoder.levels().len();

    let mut column_names: Vec<String> = [
        "intercept",
        "tdr_change",
        "velocity",
        "tdr_x_velocity",
        "ln_company_age",
        "ln_team_size",
        "round_number",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();
    column_names.extend(encoder.levels().iter().map(|l| format!("industry[{}]", l)));

    let mut matrix = Matrix::with_columns(BASE_COLUMNS + k, n);
    let mut row = vec![0.0; BASE_COLUMNS + k];
    for i in 0..n {
        row[0] = 1.0;
        row[1] = tdr[i];
        row[2] = velocity[i];
        row[3] = tdr[i] * velocity[i];
        row[4] = (controls.company_age_months[i] + 1.0).ln();
        row[5] = (controls.team_size[i] + 1.0).ln();
        row[6] = controls.round_number[i];
        encoder.encode_into(&controls.industry[i], &mut row[BASE_COLUMNS..]);
        matrix.push_row(&row)?;
    }

    Ok(DesignMatrix {
        matrix,
        column_names,
    })
}
