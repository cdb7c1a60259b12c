//! The interactive `train` / `predict` / `exit` loop.
//!
//! Input ranges are validated here, the predictor itself trusts its inputs.

use std::{
    io::{self, BufRead, Write},
    ops::RangeInclusive,
    path::PathBuf,
};

use log::{error, info};

use crate::{
    dataset::RawDataset,
    features::{MAX_ASSIGNMENTS, MAX_ATTENDANCE_PERCENT, MAX_PROJECT, MAX_QUIZ},
    linalg::{GaussJordan, MatrixKernel},
    predictor::{Predictor, TARGET_MAX},
    solver::NormalEquation,
    store::ModelStore,
    training::Trainer,
};

const PROMPT: &str = ">>> ";

/// A feature the `predict` command asks for.
struct Field {
    prompt: &'static str,
    range: RangeInclusive<f64>,
    out_of_range: &'static str,
}

const FIELDS: [Field; 4] = [
    Field {
        prompt: "assignments_avg (out of 10): ",
        range: 0.0..=MAX_ASSIGNMENTS,
        out_of_range: "Assignments average must be between 0 and 10.",
    },
    Field {
        prompt: "quiz_avg (out of 10): ",
        range: 0.0..=MAX_QUIZ,
        out_of_range: "Quiz average must be between 0 and 10.",
    },
    Field {
        prompt: "attendance_percent (0-100): ",
        range: 0.0..=MAX_ATTENDANCE_PERCENT,
        out_of_range: "Attendance percent must be between 0 and 100.",
    },
    Field {
        prompt: "project_score (out of 20): ",
        range: 0.0..=MAX_PROJECT,
        out_of_range: "Project score must be between 0 and 20.",
    },
];

/// A line oriented session over any reader and writer pair.
pub struct Shell<R, W, S, K = GaussJordan> {
    input: R,
    output: W,
    store: S,
    kernel: K,
    dataset_path: PathBuf,
}

impl<R, W, S, K> Shell<R, W, S, K>
where
    R: BufRead,
    W: Write,
    S: ModelStore,
    K: MatrixKernel + Clone,
{
    /// Creates a new `Shell`.
    ///
    /// # Arguments
    /// * `input` - Where commands and feature values are read from.
    /// * `output` - Where prompts and results are written to.
    /// * `store` - The weight store shared by `train` and `predict`.
    /// * `kernel` - The matrix backend used when training.
    /// * `dataset_path` - The CSV file `train` reads.
    ///
    /// # Returns
    /// A new `Shell` instance.
    pub fn new<P: Into<PathBuf>>(input: R, output: W, store: S, kernel: K, dataset_path: P) -> Self {
        Self {
            input,
            output,
            store,
            kernel,
            dataset_path: dataset_path.into(),
        }
    }

    /// Runs commands until `exit` or the end of the input.
    ///
    /// Failures of the commands themselves are reported to the user and the loop goes on.
    ///
    /// # Errors
    /// Only I/O errors on the input or output end the session early.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Student Marks Predictor")?;
        writeln!(
            self.output,
            "Please train the `model` before making predictions."
        )?;
        writeln!(self.output, "Commands: train, predict, exit")?;

        while let Some(line) = self.prompt(PROMPT)? {
            match line.trim().to_lowercase().as_str() {
                "exit" => break,
                "train" => self.train()?,
                "predict" => self.predict()?,
                _ => writeln!(self.output, "Unknown command.")?,
            }
        }

        info!("session finished");
        Ok(())
    }

    /// Gives the store back once the session is over.
    pub fn into_store(self) -> S {
        self.store
    }

    fn train(&mut self) -> io::Result<()> {
        let solver = NormalEquation::new(self.kernel.clone());
        let result = RawDataset::from_path(&self.dataset_path)
            .and_then(|dataset| Trainer::with_solver(&mut self.store, solver).train(&dataset));

        match result {
            Ok(report) => {
                writeln!(self.output, "Training completed.")?;
                writeln!(self.output, "MAE: {:.2}", report.mae)?;
                writeln!(self.output, "Weights saved to: {}", self.store.location())
            }
            Err(e) => {
                error!("training failed: {e}");
                writeln!(self.output, "Training failed: {e}")
            }
        }
    }

    fn predict(&mut self) -> io::Result<()> {
        if !self.store.is_trained() {
            return writeln!(self.output, "Model not trained yet. Run 'train' first.");
        }

        let mut values = [0.; FIELDS.len()];
        for (value, field) in values.iter_mut().zip(&FIELDS) {
            let Some(line) = self.prompt(field.prompt)? else {
                return Ok(());
            };

            match line.trim().parse() {
                Ok(parsed) => *value = parsed,
                Err(_) => {
                    return writeln!(self.output, "Invalid input. Please enter numeric values.");
                }
            }
        }

        if let Some(field) = FIELDS
            .iter()
            .zip(values)
            .find_map(|(field, value)| (!field.range.contains(&value)).then_some(field))
        {
            return writeln!(self.output, "{}", field.out_of_range);
        }

        let [assignments, quiz, attendance, project] = values;
        match Predictor::new(&self.store).predict(assignments, quiz, attendance, project) {
            Ok(score) => writeln!(
                self.output,
                "Predicted Final Score (out of {TARGET_MAX}): {score:.2}"
            ),
            Err(e) => {
                error!("prediction failed: {e}");
                writeln!(self.output, "Prediction failed: {e}")
            }
        }
    }

    /// Writes `prompt` and reads one line, `None` at the end of the input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line))
    }
}
