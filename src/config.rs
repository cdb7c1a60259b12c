use std::{
    env,
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::linalg::GaussJordan;

pub const CONFIG_VAR: &str = "MARKS_CONFIG";
pub const DATASET_VAR: &str = "MARKS_DATASET";
pub const WEIGHTS_VAR: &str = "MARKS_WEIGHTS";
pub const PIVOT_TOLERANCE_VAR: &str = "MARKS_PIVOT_TOLERANCE";

const DEFAULT_DATASET: &str = "data/student_marks.csv";
const DEFAULT_WEIGHTS: &str = "model_weights.txt";

/// Errors produced while assembling the configuration.
#[derive(Debug)]
pub enum ConfigErr {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            Self::Json(e) => write!(f, "invalid JSON: {e}"),
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: '{value}'"),
        }
    }
}

impl Error for ConfigErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Runtime settings of the predictor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSV file the `train` command reads.
    pub dataset_path: PathBuf,
    /// Text file holding the trained weights.
    pub weights_path: PathBuf,
    /// Pivots with a magnitude at or below this value count as zero while inverting.
    pub pivot_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            weights_path: PathBuf::from(DEFAULT_WEIGHTS),
            pivot_tolerance: 0.,
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    ///
    /// Starts from the JSON file named by `MARKS_CONFIG` (or the defaults when unset) and then
    /// applies the `MARKS_DATASET`, `MARKS_WEIGHTS` and `MARKS_PIVOT_TOLERANCE` overrides.
    ///
    /// # Errors
    /// Returns a `ConfigErr` if the file can't be read or any value is invalid.
    pub fn load() -> Result<Self, ConfigErr> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `load`, reading variables through `lookup` instead of the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_VAR) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(path) = lookup(DATASET_VAR) {
            config.dataset_path = path.into();
        }

        if let Some(path) = lookup(WEIGHTS_VAR) {
            config.weights_path = path.into();
        }

        if let Some(value) = lookup(PIVOT_TOLERANCE_VAR) {
            config.pivot_tolerance =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigErr::InvalidValue {
                        key: PIVOT_TOLERANCE_VAR,
                        value: value.clone(),
                    })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file, missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns a `ConfigErr` if the file can't be read or parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigErr> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parses a JSON configuration document.
    pub fn from_json(content: &str) -> Result<Self, ConfigErr> {
        let config: Self = serde_json::from_str(content).map_err(ConfigErr::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the matrix kernel matching the configured pivot tolerance.
    pub fn kernel(&self) -> GaussJordan {
        GaussJordan::new(self.pivot_tolerance)
    }

    fn validate(&self) -> Result<(), ConfigErr> {
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance < 0. {
            return Err(ConfigErr::InvalidValue {
                key: "pivot_tolerance",
                value: self.pivot_tolerance.to_string(),
            });
        }

        Ok(())
    }
}
