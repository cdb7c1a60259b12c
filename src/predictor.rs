use log::{debug, warn};

use crate::{
    error::Result,
    features::{FeatureVector, Weights},
    store::ModelStore,
};

/// Maximum achievable final score, predictions are scaled to this range.
pub const TARGET_MAX: f64 = 45.;

/// Scales the raw model output for `features` to `[0, TARGET_MAX]`.
///
/// The raw output is divided by the raw output at the theoretical maximum of every feature. When
/// that maximum is exactly zero the raw output is returned untouched. The result is not clamped,
/// so negative weights or unusual inputs can land outside the nominal range.
pub fn scaled_score(weights: &Weights, features: &FeatureVector) -> f64 {
    let raw = weights.apply(features);
    let max_raw = weights.apply(&FeatureVector::max());

    if max_raw == 0. {
        warn!("model output at maximum features is zero, returning the unscaled prediction");
        return raw;
    }

    debug!("raw prediction {raw}, raw maximum {max_raw}");
    (raw / max_raw) * TARGET_MAX
}

/// Predicts final scores from the weights saved in a store.
///
/// There is no caching, every prediction reads the store again.
pub struct Predictor<'s, S: ModelStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: ModelStore + ?Sized> Predictor<'s, S> {
    /// Creates a new `Predictor`.
    ///
    /// # Arguments
    /// * `store` - Where the trained weights are read from.
    ///
    /// # Returns
    /// A new `Predictor` instance.
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Predicts the final score of a student, out of `TARGET_MAX`.
    ///
    /// The inputs are expected to be in range already: assignments and quiz out of 10, attendance
    /// as a percentage and project out of 20.
    ///
    /// # Errors
    /// `ModelNotTrained` if no weights were saved, `CorruptWeights` if they can't be read.
    pub fn predict(
        &self,
        assignments_avg: f64,
        quiz_avg: f64,
        attendance_percent: f64,
        project_score: f64,
    ) -> Result<f64> {
        let features =
            FeatureVector::new(assignments_avg, quiz_avg, attendance_percent, project_score);
        self.predict_features(&features)
    }

    /// Same as `predict`, for an already encoded student.
    pub fn predict_features(&self, features: &FeatureVector) -> Result<f64> {
        let weights = self.store.load()?;
        Ok(scaled_score(&weights, features))
    }
}
