use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used across the whole predictor crate.
pub type Result<T> = std::result::Result<T, PredictorErr>;

/// The predictor's error type.
///
/// None of these conditions are transient, so nothing in the crate retries; every variant is
/// propagated to the caller as is.
#[derive(Debug)]
pub enum PredictorErr {
    MissingColumn {
        column: &'static str,
    },
    MalformedValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    EmptyDataset,
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    NotSquare {
        rows: usize,
        cols: usize,
    },
    SingularMatrix {
        column: usize,
    },
    ModelNotTrained,
    CorruptWeights {
        reason: String,
    },
    DatasetNotFound {
        path: PathBuf,
    },
    Io(io::Error),
    Csv(csv::Error),
}

impl Display for PredictorErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorErr::MissingColumn { column } => {
                write!(f, "missing column '{column}' in dataset")
            }
            PredictorErr::MalformedValue { row, column, value } => {
                write!(f, "row {row}: cannot parse '{value}' in column '{column}' as a number")
            }
            PredictorErr::EmptyDataset => write!(f, "the dataset has no rows"),
            PredictorErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            PredictorErr::NotSquare { rows, cols } => {
                write!(f, "cannot invert a non square {rows}x{cols} matrix")
            }
            PredictorErr::SingularMatrix { column } => {
                write!(f, "matrix is singular, no pivot found in column {column}")
            }
            PredictorErr::ModelNotTrained => write!(f, "the model has not been trained yet"),
            PredictorErr::CorruptWeights { reason } => {
                write!(f, "stored weights are corrupt: {reason}")
            }
            PredictorErr::DatasetNotFound { path } => {
                write!(f, "dataset file not found: {}", path.display())
            }
            PredictorErr::Io(e) => write!(f, "io error: {e}"),
            PredictorErr::Csv(e) => write!(f, "csv error: {e}"),
        }
    }
}

impl Error for PredictorErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PredictorErr::Io(e) => Some(e),
            PredictorErr::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PredictorErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PredictorErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
