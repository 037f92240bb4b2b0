use std::num::NonZeroUsize;

use ndarray::ArrayView2;
use rand::Rng;

use crate::error::{Result, TrainErr};

/// An in-memory supervised dataset of paired scalar samples, stored as two
/// parallel column buffers. Row `i` is the pair `(xs[i], ys[i])`.
pub struct Dataset {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl Dataset {
    /// Creates a dataset from owned buffers.
    ///
    /// # Errors
    /// `EmptyDataset` if there are zero samples, `LengthMismatch` if the
    /// buffers disagree.
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        if ys.len() != xs.len() {
            return Err(TrainErr::LengthMismatch {
                what: "dataset columns",
                got: ys.len(),
                expected: xs.len(),
            });
        }
        if xs.is_empty() {
            return Err(TrainErr::EmptyDataset);
        }

        Ok(Self { xs, ys })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Reorders the samples in place, keeping each `(x, y)` pair aligned.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        // Fisher-Yates over both columns in lockstep.
        for i in (1..self.xs.len()).rev() {
            let j = rng.random_range(0..=i);
            self.xs.swap(i, j);
            self.ys.swap(i, j);
        }
    }

    /// Iterates the dataset in consecutive mini-batches of at most
    /// `batch_size` rows, shaped `(rows, 1)`. The final batch may be
    /// smaller.
    pub fn batches(
        &self,
        batch_size: NonZeroUsize,
    ) -> impl Iterator<Item = (ArrayView2<'_, f32>, ArrayView2<'_, f32>)> {
        let size = batch_size.get();
        self.xs
            .chunks(size)
            .zip(self.ys.chunks(size))
            .map(|(xs, ys)| {
                let x = ArrayView2::from_shape((xs.len(), 1), xs).unwrap();
                let y = ArrayView2::from_shape((ys.len(), 1), ys).unwrap();
                (x, y)
            })
    }

    /// Views the whole dataset as a single `(len, 1)` input/label pair.
    pub fn full(&self) -> (ArrayView2<'_, f32>, ArrayView2<'_, f32>) {
        let x = ArrayView2::from_shape((self.xs.len(), 1), &self.xs).unwrap();
        let y = ArrayView2::from_shape((self.ys.len(), 1), &self.ys).unwrap();
        (x, y)
    }
}
