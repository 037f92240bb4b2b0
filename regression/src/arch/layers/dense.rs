use ndarray::{Array1, Array2, ArrayView2, Axis, linalg};
use rand::Rng;

use crate::optimization::Optimizer;

/// A fully connected layer with bias and no activation, owning its
/// parameters.
///
/// `forward` keeps the batch input around; `backward` consumes it to
/// compute the parameter gradients and the delta for the layer below.
pub struct Dense {
    dim: (usize, usize),
    w: Array2<f32>,
    b: Array1<f32>,

    // Forward metadata
    x: Array2<f32>,

    // Gradients of the latest backward pass
    dw: Array2<f32>,
    db: Array1<f32>,
}

impl Dense {
    /// Returns a new `Dense` with Glorot-uniform weights and zero biases.
    ///
    /// # Arguments
    /// * `dim` - The `(inputs, outputs)` dimensions of the layer.
    /// * `rng` - A random number generator for the weight init.
    pub fn new<R: Rng>(dim: (usize, usize), rng: &mut R) -> Self {
        let limit = (6.0 / (dim.0 + dim.1) as f32).sqrt();
        let w = Array2::from_shape_fn(dim, |_| rng.random_range(-limit..limit));
        Self::from_parts(w, Array1::zeros(dim.1))
    }

    /// Builds a layer around known weights and biases.
    ///
    /// # Panics
    /// If `b` does not have one entry per output column of `w`.
    pub fn from_parts(w: Array2<f32>, b: Array1<f32>) -> Self {
        assert_eq!(w.ncols(), b.len(), "one bias per output unit");

        let dim = (w.nrows(), w.ncols());
        Self {
            dim,
            w,
            b,
            x: Array2::zeros((1, 1)),
            dw: Array2::zeros(dim),
            db: Array1::zeros(dim.1),
        }
    }

    /// The amount of parameters this layer has.
    pub fn size(&self) -> usize {
        (self.dim.0 + 1) * self.dim.1
    }

    /// Computes `x @ w + b` for a `(rows, inputs)` batch.
    pub fn forward(&mut self, x: ArrayView2<f32>) -> Array2<f32> {
        let mut z = Array2::zeros((x.nrows(), self.dim.1));
        linalg::general_mat_mul(1.0, &x, &self.w, 0.0, &mut z);
        z += &self.b;

        self.x = x.to_owned();
        z
    }

    /// Accumulates this layer's gradients from the incoming delta and
    /// returns the delta to propagate to the layer below.
    pub fn backward(&mut self, d: ArrayView2<f32>) -> Array2<f32> {
        linalg::general_mat_mul(1.0, &self.x.t(), &d, 0.0, &mut self.dw);
        self.db.assign(&d.sum_axis(Axis(0)));

        let mut d_prev = Array2::zeros((d.nrows(), self.dim.0));
        linalg::general_mat_mul(1.0, &d, &self.w.t(), 0.0, &mut d_prev);
        d_prev
    }

    /// Applies the latest gradients to the parameters.
    pub fn update<O: Optimizer>(&mut self, optimizer: &mut O) {
        optimizer.update_params(
            self.w.as_slice_mut().unwrap(),
            self.dw.as_slice().unwrap(),
        );
        optimizer.update_params(
            self.b.as_slice_mut().unwrap(),
            self.db.as_slice().unwrap(),
        );
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::optimization::GradientDescent;

    #[test]
    fn forward_is_affine() {
        let mut layer = Dense::from_parts(array![[2.0]], array![1.0]);
        let out = layer.forward(array![[0.0], [1.0], [3.0]].view());
        assert_eq!(out, array![[1.0], [3.0], [7.0]]);
    }

    #[test]
    fn backward_accumulates_expected_gradients() {
        // y_pred = 2x + 1 against y = 3x, delta = d(mse)/d(pred).
        let mut layer = Dense::from_parts(array![[2.0]], array![1.0]);
        let x = array![[1.0], [2.0]];
        let y = array![[3.0], [6.0]];

        let y_pred = layer.forward(x.view());
        let d = (&y_pred - &y) * (2.0 / y.len() as f32);
        let d_prev = layer.backward(d.view());

        // errs = [0, -1]; dw = sum(err * x) = -2, db = sum(err) = -1.
        assert_eq!(layer.dw, array![[-2.0]]);
        assert_eq!(layer.db, array![-1.0]);
        // delta below = d @ w^T.
        assert_eq!(d_prev, array![[0.0], [-2.0]]);
    }

    #[test]
    fn update_moves_against_the_gradient() {
        let mut layer = Dense::from_parts(array![[2.0]], array![1.0]);
        let x = array![[1.0], [2.0]];
        let y = array![[3.0], [6.0]];

        let y_pred = layer.forward(x.view());
        let d = (&y_pred - &y) * (2.0 / y.len() as f32);
        layer.backward(d.view());

        let mut sgd = GradientDescent::new(0.5);
        layer.update(&mut sgd);

        assert_eq!(layer.w, array![[3.0]]);
        assert_eq!(layer.b, array![1.5]);
    }

    #[test]
    fn size_counts_weights_and_biases() {
        let mut rng = rand::rng();
        assert_eq!(Dense::new((1, 1), &mut rng).size(), 2);
        assert_eq!(Dense::new((3, 2), &mut rng).size(), 8);
    }
}
