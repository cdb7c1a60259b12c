//! Dense matrix algebra over row-major `Vec<Vec<f64>>` matrices.
//!
//! The solver only talks to this module through the [`MatrixKernel`] trait, so an optimized
//! backend can replace [`GaussJordan`] without touching the solver or the trainer.

use log::debug;

use crate::error::{PredictorErr, Result};

/// A dense, row-major matrix.
pub type Matrix = Vec<Vec<f64>>;

/// The narrow interface the normal-equation solver needs from a matrix backend.
pub trait MatrixKernel {
    /// Swaps rows and columns of `a`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the rows of `a` don't all have the same length.
    fn transpose(&self, a: &[Vec<f64>]) -> Result<Matrix>;

    /// Computes the product `a * b`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the columns of `a` don't match the rows of `b`.
    fn multiply(&self, a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Matrix>;

    /// Computes the inverse of the square matrix `a`.
    ///
    /// # Errors
    /// `NotSquare` for rectangular input, `SingularMatrix` if a pivot column is all zeros.
    fn invert(&self, a: &[Vec<f64>]) -> Result<Matrix>;
}

/// Gauss-Jordan elimination with row pivoting.
///
/// A pivot is considered missing when its magnitude is at most `pivot_tolerance`. The default
/// tolerance is exactly zero, which means near singular matrices are still inverted and may
/// produce numerically poor results.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GaussJordan {
    pivot_tolerance: f64,
}

impl GaussJordan {
    /// Creates a new `GaussJordan` kernel.
    ///
    /// # Arguments
    /// * `pivot_tolerance` - Magnitude at or below which a pivot counts as zero.
    ///
    /// # Returns
    /// A new `GaussJordan` instance.
    pub fn new(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }

    pub fn pivot_tolerance(&self) -> f64 {
        self.pivot_tolerance
    }

    fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.pivot_tolerance
    }
}

impl MatrixKernel for GaussJordan {
    fn transpose(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        let cols = columns(a);
        check_rectangular(a, cols, "transposed row")?;

        Ok((0..cols)
            .map(|j| a.iter().map(|row| row[j]).collect())
            .collect())
    }

    fn multiply(&self, a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Matrix> {
        let inner = columns(a);
        let cols = columns(b);

        check_rectangular(a, inner, "left operand row")?;
        check_rectangular(b, cols, "right operand row")?;

        if inner != b.len() {
            return Err(PredictorErr::DimensionMismatch {
                what: "left operand columns vs right operand rows",
                got: inner,
                expected: b.len(),
            });
        }

        let product: Matrix = a
            .iter()
            .map(|row| {
                (0..cols)
                    .map(|j| row.iter().zip(b).map(|(x, b_row)| x * b_row[j]).sum::<f64>())
                    .collect()
            })
            .collect();

        Ok(product)
    }

    fn invert(&self, a: &[Vec<f64>]) -> Result<Matrix> {
        let n = a.len();
        if let Some(row) = a.iter().find(|row| row.len() != n) {
            return Err(PredictorErr::NotSquare {
                rows: n,
                cols: row.len(),
            });
        }

        let mut work = a.to_vec();
        let mut inverse = identity(n);

        for col in 0..n {
            if self.is_zero(work[col][col]) {
                let Some(swap) = (col + 1..n).find(|&row| !self.is_zero(work[row][col])) else {
                    return Err(PredictorErr::SingularMatrix { column: col });
                };

                debug!("swapping rows {col} and {swap} to find a pivot");
                work.swap(col, swap);
                inverse.swap(col, swap);
            }

            let scale = 1.0 / work[col][col];
            work[col].iter_mut().for_each(|v| *v *= scale);
            inverse[col].iter_mut().for_each(|v| *v *= scale);

            let pivot_row = work[col].clone();
            let pivot_inv = inverse[col].clone();

            for row in (0..n).filter(|&row| row != col) {
                let factor = work[row][col];
                for (v, p) in work[row].iter_mut().zip(&pivot_row) {
                    *v -= factor * p;
                }
                for (v, p) in inverse[row].iter_mut().zip(&pivot_inv) {
                    *v -= factor * p;
                }
            }
        }

        Ok(inverse)
    }
}

/// Returns the `n x n` identity matrix.
pub fn identity(n: usize) -> Matrix {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Returns `a` transposed, using the default kernel.
pub fn transpose(a: &[Vec<f64>]) -> Result<Matrix> {
    GaussJordan::default().transpose(a)
}

/// Returns the product `a * b`, using the default kernel.
pub fn multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> Result<Matrix> {
    GaussJordan::default().multiply(a, b)
}

/// Returns the inverse of `a`, using the default exact-zero pivot test.
pub fn invert(a: &[Vec<f64>]) -> Result<Matrix> {
    GaussJordan::default().invert(a)
}

fn columns(a: &[Vec<f64>]) -> usize {
    a.first().map_or(0, Vec::len)
}

fn check_rectangular(a: &[Vec<f64>], cols: usize, what: &'static str) -> Result<()> {
    match a.iter().find(|row| row.len() != cols) {
        Some(row) => Err(PredictorErr::DimensionMismatch {
            what,
            got: row.len(),
            expected: cols,
        }),
        None => Ok(()),
    }
}
