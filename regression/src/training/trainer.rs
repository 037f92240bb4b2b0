use std::num::NonZeroUsize;

use rand::Rng;

use super::{EpochMetrics, TrainingHistory};
use crate::{
    arch::{Sequential, loss::LossFn},
    dataset::Dataset,
    error::Result,
    optimization::Optimizer,
};

/// Drives a fixed fit schedule. Contains the relevant components needed
/// for fitting a model, including the model itself.
///
/// Each epoch reshuffles the dataset, passes over it in mini-batches and
/// records the epoch's metrics. There is no early stopping and no
/// convergence check: the schedule always runs to its configured length.
pub struct Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    model: Sequential,
    optimizer: O,
    loss_fn: L,
    dataset: Dataset,

    epochs: NonZeroUsize,
    batch_size: NonZeroUsize,
    rng: R,
}

/// A fitted model together with the metrics of its fit.
pub struct FitOutcome {
    pub model: Sequential,
    pub history: TrainingHistory,
}

impl<O, L, R> Trainer<O, L, R>
where
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be fitted.
    /// * `optimizer` - The update rule applied after every batch.
    /// * `loss_fn` - The loss measuring prediction error.
    /// * `dataset` - The samples the model will be fitted to.
    /// * `epochs` - The amount of passes over the dataset.
    /// * `batch_size` - The amount of rows per mini-batch.
    /// * `rng` - A random number generator for the per-epoch shuffles.
    pub fn new(
        model: Sequential,
        optimizer: O,
        loss_fn: L,
        dataset: Dataset,
        epochs: NonZeroUsize,
        batch_size: NonZeroUsize,
        rng: R,
    ) -> Self {
        Self {
            model,
            optimizer,
            loss_fn,
            dataset,
            epochs,
            batch_size,
            rng,
        }
    }

    /// Runs the full schedule and hands back the fitted model with its
    /// history. A non-finite loss is recorded as-is and does not stop the
    /// schedule.
    pub fn fit(mut self) -> Result<FitOutcome> {
        let mut history = TrainingHistory::with_capacity(self.epochs.get());

        for epoch in 0..self.epochs.get() {
            self.dataset.shuffle(&mut self.rng);

            let loss = self.model.fit_epoch(
                &self.loss_fn,
                &mut self.optimizer,
                self.dataset.batches(self.batch_size),
            )?;

            let (xs, ys) = self.dataset.full();
            let y_pred = self.model.forward(xs);
            let mse = self.loss_fn.loss(y_pred.view(), ys);

            history.record(EpochMetrics { epoch, loss, mse });
        }

        Ok(FitOutcome {
            model: self.model,
            history,
        })
    }
}
