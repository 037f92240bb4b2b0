mod history;
mod trainer;

pub use history::{EpochMetrics, TrainingHistory};
pub use trainer::{FitOutcome, Trainer};
