// Ordinary least squares via the normal equations
//
//   beta = (X'X)^-1 X'y
//   e    = y - X beta,  RSS = sum(e^2),  MSE = RSS / (n - p)
//   SE_i = sqrt(MSE * |diag((X'X)^-1)_i|)
//
// The absolute value on the diagonal absorbs tiny negative entries that a
// near-singular inverse can produce.

use crate::error::{AnalysisError, Result};
use crate::linalg::{invert, matrix_vector_multiply, multiply, transpose, Matrix};

/// Raw OLS output
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub coefficients: Vec<f64>,
    pub standard_errors: Vec<f64>,
    pub t_statistics: Vec<f64>,
    pub rss: f64,
    pub tss: f64,
    pub r_squared: f64,
    pub adjusted_r_squared: f64,
    /// Residual degrees of freedom, n - p
    pub df: usize,
}

/// Fit `y ~ X` by OLS
///
/// # Errors
/// - `LengthMismatch` when `y` and `X` disagree on row count
/// - `InsufficientSample` when there are no residual degrees of freedom
pub fn fit_ols(x: &Matrix, y: &[f64]) -> Result<OlsFit> {
    let (n, p) = x.shape();
    if y.len() != n {
        return Err(AnalysisError::LengthMismatch {
            expected: n,
            actual: y.len(),
        });
    }
    if n <= p {
        return Err(AnalysisError::InsufficientSample {
            required: p + 1,
            actual: n,
        });
    }

    let xt = transpose(x);
    let xtx = multiply(&xt, x)?;
    let xtx_inv = invert(&xtx)?;
    let xty = matrix_vector_multiply(&xt, y)?;
    let coefficients = matrix_vector_multiply(&xtx_inv, &xty)?;

    let fitted = matrix_vector_multiply(x, &coefficients)?;
    let rss: f64 = y
        .iter()
        .zip(&fitted)
        .map(|(actual, predicted)| (actual - predicted).powi(2))
        .sum();

    let mean_y = y.iter().sum::<f64>() / n as f64;
    let tss: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
    let r_squared = if tss == 0.0 {
        0.0
    } else {
        (1.0 - rss / tss).max(0.0)
    };

    let df = n - p;
    let mse = rss / df as f64;
    let adjusted_r_squared = 1.0 - (1.0 - r_squared) * (n - 1) as f64 / df as f64;

    let standard_errors: Vec<f64> = xtx_inv
        .diagonal()
        .iter()
        .map(|d| (mse * d.abs()).sqrt())
        .collect();
    let t_statistics = coefficients
        .iter()
        .zip(&standard_errors)
        .map(|(coef, se)| if *se == 0.0 { 0.0 } else { coef / se })
        .collect();

    Ok(OlsFit {
        coefficients,
        standard_errors,
        t_statistics,
        rss,
        tss,
        r_squared,
        adjusted_r_squared,
        df,
    })
}
