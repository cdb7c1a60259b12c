use log::debug;

use crate::{
    error::{PredictorErr, Result},
    linalg::{GaussJordan, MatrixKernel},
};

/// Ordinary least squares through the normal equation `w = (XᵀX)⁻¹ Xᵀy`.
///
/// There is no regularization term: a collinear design matrix makes `XᵀX` singular and the
/// solve fails.
#[derive(Debug, Clone, Default)]
pub struct NormalEquation<K: MatrixKernel = GaussJordan> {
    kernel: K,
}

impl<K: MatrixKernel> NormalEquation<K> {
    /// Creates a new `NormalEquation` solver.
    ///
    /// # Arguments
    /// * `kernel` - The matrix backend used for every product and the inversion.
    ///
    /// # Returns
    /// A new `NormalEquation` instance.
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }

    /// Solves for the weights minimizing `Σ (X·w - y)²`.
    ///
    /// # Arguments
    /// * `x` - The design matrix, one row per example.
    /// * `y` - The targets, index aligned with the rows of `x`.
    ///
    /// # Returns
    /// One weight per column of `x`.
    ///
    /// # Errors
    /// `DimensionMismatch` if `x` and `y` disagree in length or `x` is ragged, and
    /// `SingularMatrix` if `XᵀX` can't be inverted.
    pub fn solve(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Vec<f64>> {
        if x.len() != y.len() {
            return Err(PredictorErr::DimensionMismatch {
                what: "design matrix rows vs targets",
                got: x.len(),
                expected: y.len(),
            });
        }

        let xt = self.kernel.transpose(x)?;
        let xtx = self.kernel.multiply(&xt, x)?;
        debug!("solving normal equation with a {0}x{0} gram matrix", xtx.len());

        let xtx_inv = self.kernel.invert(&xtx)?;

        let y: Vec<Vec<f64>> = y.iter().map(|&v| vec![v]).collect();
        let xty = self.kernel.multiply(&xt, &y)?;
        let w = self.kernel.multiply(&xtx_inv, &xty)?;

        Ok(w.into_iter().flatten().collect())
    }
}
