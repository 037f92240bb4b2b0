use std::num::NonZeroUsize;

use crate::{records::Field, source::DEFAULT_DATA_URL};

const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(50).unwrap();
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(32).unwrap();
const DEFAULT_LEARNING_RATE: f32 = 0.25;

/// Fit schedule and optimization settings for one training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Full passes over the dataset.
    pub epochs: NonZeroUsize,
    /// Rows per mini-batch.
    pub batch_size: NonZeroUsize,
    pub learning_rate: f32,
    /// Seeds the raw-order shuffle, the weight init and the per-epoch
    /// shuffles. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    /// The fixed tutorial schedule: 50 epochs of shuffled batches of 32.
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            batch_size: DEFAULT_BATCH_SIZE,
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: None,
        }
    }
}

/// Immutable settings for one pipeline session. Built once and passed
/// along, never mutated mid-run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_url: String,
    /// The record field feeding the model input axis.
    pub x_field: Field,
    /// The record field the model learns to predict.
    pub y_field: Field,
    pub training: TrainConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_DATA_URL.to_owned(),
            x_field: Field::Horsepower,
            y_field: Field::MilesPerGallon,
            training: TrainConfig::default(),
        }
    }
}
