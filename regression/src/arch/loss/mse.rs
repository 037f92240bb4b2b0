use ndarray::{Array2, ArrayView2};

use super::LossFn;

/// Mean squared error.
#[derive(Default, Clone, Copy)]
pub struct Mse;

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        (&y_pred - &y)
            .mapv(|e| e.powi(2))
            .mean()
            .unwrap_or_default()
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        (&y_pred - &y) * (2.0 / y_pred.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn loss_is_the_mean_of_squared_errors() {
        let y_pred = array![[1.0], [2.0]];
        let y = array![[0.0], [4.0]];
        assert_eq!(Mse.loss(y_pred.view(), y.view()), 2.5);
    }

    #[test]
    fn loss_prime_scales_errors_by_two_over_n() {
        let y_pred = array![[1.0], [2.0]];
        let y = array![[0.0], [4.0]];
        assert_eq!(
            Mse.loss_prime(y_pred.view(), y.view()),
            array![[1.0], [-2.0]]
        );
    }

    #[test]
    fn perfect_prediction_has_zero_loss() {
        let y = array![[3.0], [5.0]];
        assert_eq!(Mse.loss(y.view(), y.view()), 0.0);
    }
}
