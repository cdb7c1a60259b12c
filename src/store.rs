use std::{fs, io, path::PathBuf};

use log::{debug, info};

use crate::{
    error::{PredictorErr, Result},
    features::Weights,
};

/// Persistent home of the single trained weight vector.
///
/// Only one writer is assumed: training and predicting against the same store must be
/// serialized by the caller, which is why saving needs exclusive access.
pub trait ModelStore {
    /// Loads the last saved weights.
    ///
    /// # Errors
    /// `ModelNotTrained` if nothing was ever saved, `CorruptWeights` if the stored form can't be
    /// read back.
    fn load(&self) -> Result<Weights>;

    /// Replaces whatever weights were stored before.
    fn save(&mut self, weights: &Weights) -> Result<()>;

    /// Whether there are saved weights to load.
    fn is_trained(&self) -> bool;

    /// A human readable description of where the weights live.
    fn location(&self) -> String;
}

/// Stores the weights as a single line of whitespace separated numbers in a text file.
///
/// The file is overwritten in place, so a crash halfway through a save can leave a truncated
/// file behind. The next `load` reports it as `CorruptWeights`.
#[derive(Debug, Clone)]
pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl ModelStore for FileModelStore {
    fn load(&self) -> Result<Weights> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PredictorErr::ModelNotTrained);
            }
            Err(e) => return Err(e.into()),
        };

        debug!("loaded weights from {}", self.path.display());
        text.parse()
    }

    fn save(&mut self, weights: &Weights) -> Result<()> {
        fs::write(&self.path, weights.to_string())?;
        info!("saved weights to {}", self.path.display());
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.path.exists()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory store, mostly useful for tests and one-shot sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryModelStore {
    weights: Option<Weights>,
}

impl MemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights: Some(weights),
        }
    }
}

impl ModelStore for MemoryModelStore {
    fn load(&self) -> Result<Weights> {
        self.weights.ok_or(PredictorErr::ModelNotTrained)
    }

    fn save(&mut self, weights: &Weights) -> Result<()> {
        self.weights = Some(*weights);
        Ok(())
    }

    fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    fn location(&self) -> String {
        "memory".into()
    }
}
