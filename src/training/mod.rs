mod metrics;
mod trainer;

pub use metrics::mean_absolute_error;
pub use trainer::{TrainReport, Trainer};
