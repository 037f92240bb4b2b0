use ndarray::{Array2, ArrayView2};

use super::{layers::Dense, loss::LossFn};
use crate::{
    error::{Result, TrainErr},
    optimization::Optimizer,
};

/// A stack of dense layers: inputs flow forward through every layer when
/// predicting, deltas flow backward through them when fitting.
pub struct Sequential {
    layers: Vec<Dense>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the model is composed of, input first.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Dense>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// The amount of parameters in the model.
    pub fn size(&self) -> usize {
        self.layers.iter().map(Dense::size).sum()
    }

    /// Makes a forward pass through the network.
    pub fn forward(&mut self, x: ArrayView2<f32>) -> Array2<f32> {
        let mut a = x.to_owned();
        for layer in &mut self.layers {
            a = layer.forward(a.view());
        }
        a
    }

    /// Predicts one output per scalar input. Convenience for callers that
    /// hold flat buffers rather than arrays.
    pub fn predict(&mut self, xs: &[f32]) -> Vec<f32> {
        let x = ArrayView2::from_shape((xs.len(), 1), xs).unwrap();
        self.forward(x).into_iter().collect()
    }

    /// One pass over the provided batches: forward, backward and a
    /// parameter update per batch.
    ///
    /// # Returns
    /// The mean batch loss. Getting the exact epoch loss would need a
    /// second forward pass over everything, the mean over batches is a
    /// close approximation.
    pub fn fit_epoch<'a, L, O, I>(
        &mut self,
        loss_fn: &L,
        optimizer: &mut O,
        batches: I,
    ) -> Result<f32>
    where
        L: LossFn,
        O: Optimizer,
        I: Iterator<Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>)>,
    {
        let mut total_loss = 0.0;
        let mut num_batches = 0;

        for (x, y) in batches {
            let y_pred = self.forward(x);
            total_loss += loss_fn.loss(y_pred.view(), y);
            num_batches += 1;

            let mut d = loss_fn.loss_prime(y_pred.view(), y);
            for layer in self.layers.iter_mut().rev() {
                d = layer.backward(d.view());
            }

            for layer in &mut self.layers {
                layer.update(optimizer);
            }
        }

        if num_batches == 0 {
            return Err(TrainErr::EmptyDataset);
        }

        Ok(total_loss / num_batches as f32)
    }
}
