pub mod attendance;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::error::{PredictorErr, Result};

/// Number of model parameters: the bias plus one weight per feature.
pub const NUM_WEIGHTS: usize = 5;

pub const MAX_ASSIGNMENTS: f64 = 10.;
pub const MAX_QUIZ: f64 = 10.;
pub const MAX_ATTENDANCE_PERCENT: f64 = 100.;
pub const MAX_PROJECT: f64 = 20.;

/// The four model features of a single student.
///
/// Attendance is kept only as its point bucket, the raw percentage is discarded once encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub assignments_avg: f64,
    pub quiz_avg: f64,
    pub attendance_points: u8,
    pub project_score: f64,
}

impl FeatureVector {
    /// Creates a new `FeatureVector`, bucketing the attendance percentage.
    ///
    /// # Arguments
    /// * `assignments_avg` - Assignment average, out of 10.
    /// * `quiz_avg` - Quiz average, out of 10.
    /// * `attendance_percent` - Attendance percentage, out of 100.
    /// * `project_score` - Project score, out of 20.
    ///
    /// # Returns
    /// A new `FeatureVector` instance.
    pub fn new(
        assignments_avg: f64,
        quiz_avg: f64,
        attendance_percent: f64,
        project_score: f64,
    ) -> Self {
        Self {
            assignments_avg,
            quiz_avg,
            attendance_points: attendance::points(attendance_percent),
            project_score,
        }
    }

    /// The theoretical maximum of every feature.
    pub fn max() -> Self {
        Self {
            assignments_avg: MAX_ASSIGNMENTS,
            quiz_avg: MAX_QUIZ,
            attendance_points: attendance::MAX_POINTS,
            project_score: MAX_PROJECT,
        }
    }

    /// Returns the design row `[1, assignments, quiz, attendance points, project]`.
    pub fn design_row(&self) -> [f64; NUM_WEIGHTS] {
        [
            1.,
            self.assignments_avg,
            self.quiz_avg,
            f64::from(self.attendance_points),
            self.project_score,
        ]
    }
}

/// The trained parameters, ordered `(bias, assignments, quiz, attendance, project)`.
///
/// Persisted as whitespace separated decimal text through its `Display` and `FromStr` impls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights([f64; NUM_WEIGHTS]);

impl Weights {
    pub fn new(values: [f64; NUM_WEIGHTS]) -> Self {
        Self(values)
    }

    /// Builds the weights out of a solver output.
    ///
    /// # Errors
    /// `DimensionMismatch` if `values` doesn't hold exactly `NUM_WEIGHTS` numbers.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let values: [f64; NUM_WEIGHTS] = values
            .try_into()
            .map_err(|_| PredictorErr::DimensionMismatch {
                what: "weight vector",
                got: values.len(),
                expected: NUM_WEIGHTS,
            })?;

        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64; NUM_WEIGHTS] {
        &self.0
    }

    /// Computes the raw (unscaled) model output for `row`.
    pub fn dot(&self, row: &[f64; NUM_WEIGHTS]) -> f64 {
        self.0.iter().zip(row).map(|(w, x)| w * x).sum()
    }

    /// Computes the raw (unscaled) model output for a student.
    pub fn apply(&self, features: &FeatureVector) -> f64 {
        self.dot(&features.design_row())
    }
}

impl Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.0.iter();
        if let Some(first) = values.next() {
            write!(f, "{first}")?;
        }

        for value in values {
            write!(f, " {value}")?;
        }

        Ok(())
    }
}

impl FromStr for Weights {
    type Err = PredictorErr;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != NUM_WEIGHTS {
            return Err(PredictorErr::CorruptWeights {
                reason: format!("expected {NUM_WEIGHTS} values, found {}", tokens.len()),
            });
        }

        let mut values = [0.; NUM_WEIGHTS];
        for (value, token) in values.iter_mut().zip(tokens) {
            *value = token.parse().map_err(|_| PredictorErr::CorruptWeights {
                reason: format!("'{token}' is not a number"),
            })?;
        }

        Ok(Self(values))
    }
}
