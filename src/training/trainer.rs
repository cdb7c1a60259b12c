use log::{info, trace};

use super::mean_absolute_error;
use crate::{
    dataset::{RawDataset, REQUIRED_COLUMNS},
    error::{PredictorErr, Result},
    features::{FeatureVector, Weights, NUM_WEIGHTS},
    linalg::{GaussJordan, Matrix, MatrixKernel},
    solver::NormalEquation,
    store::ModelStore,
};

/// The outcome of a successful training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    pub weights: Weights,
    /// Mean absolute error over the training set itself.
    pub mae: f64,
    pub samples: usize,
}

/// Fits the linear model on a dataset and persists the resulting weights.
pub struct Trainer<'s, S: ModelStore + ?Sized, K: MatrixKernel = GaussJordan> {
    store: &'s mut S,
    solver: NormalEquation<K>,
}

impl<'s, S: ModelStore + ?Sized> Trainer<'s, S> {
    /// Creates a new `Trainer` using the exact-zero pivot test.
    ///
    /// # Arguments
    /// * `store` - Where the trained weights get saved.
    ///
    /// # Returns
    /// A new `Trainer` instance.
    pub fn new(store: &'s mut S) -> Self {
        Self::with_solver(store, NormalEquation::default())
    }
}

impl<'s, S: ModelStore + ?Sized, K: MatrixKernel> Trainer<'s, S, K> {
    /// Creates a new `Trainer` with a custom solver.
    ///
    /// # Arguments
    /// * `store` - Where the trained weights get saved.
    /// * `solver` - The least squares solver to fit the weights with.
    ///
    /// # Returns
    /// A new `Trainer` instance.
    pub fn with_solver(store: &'s mut S, solver: NormalEquation<K>) -> Self {
        Self { store, solver }
    }

    /// Fits the weights on `dataset`, saves them and reports the in-sample error.
    ///
    /// The previously stored weights are replaced only when every step before saving succeeds.
    ///
    /// # Errors
    /// `MissingColumn`, `MalformedValue` or `EmptyDataset` for unusable data, `SingularMatrix` if
    /// the features are collinear, and whatever the store fails with while saving.
    pub fn train(&mut self, dataset: &RawDataset) -> Result<TrainReport> {
        let columns = locate_columns(dataset)?;

        let mut rows = Vec::with_capacity(dataset.len());
        let mut targets = Vec::with_capacity(dataset.len());

        for (i, record) in dataset.rows().iter().enumerate() {
            let (features, target) = parse_record(i + 1, record, &columns)?;
            trace!("row {}: {features:?} -> {target}", i + 1);
            rows.push(features.design_row());
            targets.push(target);
        }

        if rows.is_empty() {
            return Err(PredictorErr::EmptyDataset);
        }

        info!("training on {} sample(s)", rows.len());

        let x: Matrix = rows.iter().map(|row| row.to_vec()).collect();
        let weights = Weights::from_slice(&self.solver.solve(&x, &targets)?)?;

        let predicted: Vec<f64> = rows.iter().map(|row| weights.dot(row)).collect();
        let mae = mean_absolute_error(&predicted, &targets)?;

        self.store.save(&weights)?;
        info!("training completed with mae {mae:.4}, weights [{weights}]");

        Ok(TrainReport {
            weights,
            mae,
            samples: rows.len(),
        })
    }
}

/// Finds the position of every required column in the dataset header.
fn locate_columns(dataset: &RawDataset) -> Result<[usize; NUM_WEIGHTS]> {
    let mut columns = [0; NUM_WEIGHTS];

    for (idx, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
        *idx = dataset
            .column(name)
            .ok_or(PredictorErr::MissingColumn { column: name })?;
    }

    Ok(columns)
}

/// Parses one record into its features and its final score.
fn parse_record(
    row: usize,
    record: &[String],
    columns: &[usize; NUM_WEIGHTS],
) -> Result<(FeatureVector, f64)> {
    let field = |slot: usize| -> Result<f64> {
        let column = REQUIRED_COLUMNS[slot];
        let value = record.get(columns[slot]).map_or("", String::as_str);

        value
            .trim()
            .parse()
            .map_err(|_| PredictorErr::MalformedValue {
                row,
                column,
                value: value.to_string(),
            })
    };

    let features = FeatureVector::new(field(0)?, field(1)?, field(2)?, field(3)?);
    Ok((features, field(4)?))
}
