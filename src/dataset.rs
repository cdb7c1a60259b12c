use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::error::{PredictorErr, Result};

pub const ASSIGNMENTS_AVG: &str = "assignments_avg";
pub const QUIZ_AVG: &str = "quiz_avg";
pub const ATTENDANCE_PERCENT: &str = "attendance_percent";
pub const PROJECT_SCORE: &str = "project_score";
pub const FINAL_SCORE: &str = "final_score";

/// Columns every training dataset must provide, in the order the trainer reads them.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    ASSIGNMENTS_AVG,
    QUIZ_AVG,
    ATTENDANCE_PERCENT,
    PROJECT_SCORE,
    FINAL_SCORE,
];

/// A table of unparsed records with named columns.
///
/// Values are kept as text, numeric parsing is the trainer's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawDataset {
    /// Creates a new `RawDataset` out of already split records.
    ///
    /// # Arguments
    /// * `headers` - The column names.
    /// * `rows` - The records, each one holding a value per column.
    ///
    /// # Returns
    /// A new `RawDataset` instance.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads a comma separated table whose first line names the columns.
    ///
    /// # Errors
    /// `Csv` if the input isn't valid CSV.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Fields)
            .from_reader(reader);

        let headers = reader.headers()?.iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|record| -> Result<Vec<String>> {
                Ok(record?.iter().map(String::from).collect())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { headers, rows })
    }

    /// Reads a dataset file.
    ///
    /// # Errors
    /// `DatasetNotFound` if `path` doesn't exist, otherwise whatever `from_reader` returns.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PredictorErr::DatasetNotFound {
                path: path.to_path_buf(),
            },
            _ => PredictorErr::Io(e),
        })?;

        let dataset = Self::from_reader(io::BufReader::new(file))?;
        debug!("read {} record(s) from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of the column called `name`, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}
