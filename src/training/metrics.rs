use crate::error::{PredictorErr, Result};

/// Computes the mean absolute error between predictions and the actual targets.
///
/// # Errors
/// `DimensionMismatch` if both slices differ in length, `EmptyDataset` if they are empty.
pub fn mean_absolute_error(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(PredictorErr::DimensionMismatch {
            what: "predictions vs targets",
            got: predicted.len(),
            expected: actual.len(),
        });
    }

    if actual.is_empty() {
        return Err(PredictorErr::EmptyDataset);
    }

    let total: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).abs())
        .sum();

    Ok(total / actual.len() as f64)
}
