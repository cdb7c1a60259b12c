pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod linalg;
pub mod predictor;
pub mod shell;
pub mod solver;
pub mod store;
pub mod training;

pub use error::{PredictorErr, Result};
