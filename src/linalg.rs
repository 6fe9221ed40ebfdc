//! Dense linear algebra kernel for the OLS solver
//!
//! Row-major, growable `f64` matrices. Only what the normal equations need:
//! transpose, product, Gauss-Jordan inverse and matrix-vector product.

use crate::error::{AnalysisError, Result};

/// Pivots with an absolute value below this are treated as a degenerate
/// column and skipped during elimination.
pub const PIVOT_EPSILON: f64 = 1e-10;

/// Row-major dense matrix
///
/// Column count is fixed at construction; rows can be appended, which lets
/// the design matrix grow one observation at a time while its width depends
/// on the sample (one dummy per observed industry).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Empty matrix with a fixed column count and room for `capacity` rows
    pub fn with_columns(cols: usize, capacity: usize) -> Self {
        Self {
            rows: 0,
            cols,
            data: Vec::with_capacity(cols * capacity),
        }
    }

    /// All-zero `rows x cols` matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// `n x n` identity
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build from nested rows; every row must have the same length
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut m = Self::with_columns(cols, rows.len());
        for row in rows {
            m.push_row(row)?;
        }
        Ok(m)
    }

    /// Append one row
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.cols {
            return Err(AnalysisError::DimensionMismatch {
                operation: "push_row",
                left: (self.rows, self.cols),
                right: (1, row.len()),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Main diagonal (square or not, up to the shorter side)
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols)).map(|i| self.get(i, i)).collect()
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            self.data.swap(a * self.cols + col, b * self.cols + col);
        }
    }
}

/// Transpose of `m`
pub fn transpose(m: &Matrix) -> Matrix {
    let mut t = Matrix::zeros(m.cols, m.rows);
    for i in 0..m.rows {
        for j in 0..m.cols {
            t.set(j, i, m.get(i, j));
        }
    }
    t
}

/// Matrix product `a * b`
///
/// # Errors
/// `DimensionMismatch` when `a.cols != b.rows`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols != b.rows {
        return Err(AnalysisError::DimensionMismatch {
            operation: "multiply",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let mut out = Matrix::zeros(a.rows, b.cols);
    for i in 0..a.rows {
        for k in 0..a.cols {
            let lhs = a.get(i, k);
            if lhs == 0.0 {
                continue;
            }
            for j in 0..b.cols {
                let idx = i * out.cols + j;
                out.data[idx] += lhs * b.get(k, j);
            }
        }
    }
    Ok(out)
}

/// Matrix-vector product `m * v`
///
/// # Errors
/// `DimensionMismatch` when `m.cols != v.len()`.
pub fn matrix_vector_multiply(m: &Matrix, v: &[f64]) -> Result<Vec<f64>> {
    if m.cols != v.len() {
        return Err(AnalysisError::DimensionMismatch {
            operation: "matrix_vector_multiply",
            left: m.shape(),
            right: (v.len(), 1),
        });
    }

    Ok((0..m.rows)
        .map(|i| m.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
        .collect())
}

/// Inverse by Gauss-Jordan elimination with partial pivoting on `[M | I]`
///
/// The row with the largest absolute value in the current column is swapped
/// in as pivot. When that pivot is below [`PIVOT_EPSILON`] the column is left
/// un-eliminated instead of failing, so rank-deficient designs (e.g. an
/// industry dummy that is collinear with the intercept) still produce a
/// usable pseudo-inverse-like result.
///
/// # Errors
/// `NotSquare` when `m` is not square.
pub fn invert(m: &Matrix) -> Result<Matrix> {
    if m.rows != m.cols {
        return Err(AnalysisError::NotSquare {
            rows: m.rows,
            cols: m.cols,
        });
    }

    let n = m.rows;
    let width = 2 * n;
    let mut aug = Matrix::zeros(n, width);
    for i in 0..n {
        for j in 0..n {
            aug.set(i, j, m.get(i, j));
        }
        aug.set(i, n + i, 1.0);
    }

    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_abs = aug.get(col, col).abs();
        for r in (col + 1)..n {
            let candidate = aug.get(r, col).abs();
            if candidate > pivot_abs {
                pivot_abs = candidate;
                pivot_row = r;
            }
        }
        aug.swap_rows(col, pivot_row);

        let pivot = aug.get(col, col);
        if pivot.abs() < PIVOT_EPSILON {
            tracing::debug!(column = col, pivot, "Skipping degenerate pivot");
            continue;
        }

        for j in 0..width {
            let v = aug.get(col, j) / pivot;
            aug.set(col, j, v);
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = aug.get(r, col);
            if factor == 0.0 {
                continue;
            }
            for j in 0..width {
                let v = aug.get(r, j) - factor * aug.get(col, j);
                aug.set(r, j, v);
            }
        }
    }

    let mut inv = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            inv.set(i, j, aug.get(i, n + j));
        }
    }
    Ok(inv)
}
