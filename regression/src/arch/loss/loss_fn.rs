use ndarray::{Array2, ArrayView2};

/// A differentiable loss over a batch of predictions.
pub trait LossFn {
    /// The scalar loss for the batch.
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32;

    /// The derivative of the loss with respect to each prediction.
    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32>;
}
