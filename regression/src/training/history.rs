/// Metrics captured at one epoch boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    /// Epoch index, starting at 0.
    pub epoch: usize,
    /// Mean batch loss over the epoch.
    pub loss: f32,
    /// Full-dataset mean squared error after the epoch's updates.
    pub mse: f32,
}

/// The ordered per-epoch metrics of a single fit.
///
/// Append-only while the fit runs, immutable afterwards. A new fit gets a
/// new history; histories are never merged across runs.
#[derive(Debug, Default, Clone)]
pub struct TrainingHistory {
    epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub(crate) fn with_capacity(epochs: usize) -> Self {
        Self {
            epochs: Vec::with_capacity(epochs),
        }
    }

    pub(crate) fn record(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// The metrics of one epoch, `None` past the end.
    pub fn get(&self, epoch: usize) -> Option<&EpochMetrics> {
        self.epochs.get(epoch)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpochMetrics> {
        self.epochs.iter()
    }

    /// The metrics of the final epoch, `None` for an empty history.
    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epochs_come_back_in_recording_order() {
        let mut history = TrainingHistory::with_capacity(2);
        history.record(EpochMetrics { epoch: 0, loss: 1.0, mse: 1.5 });
        history.record(EpochMetrics { epoch: 1, loss: 0.5, mse: 0.7 });

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().mse, 1.5);
        assert_eq!(history.last().unwrap().epoch, 1);
        assert_eq!(history.get(2), None);

        let indices: Vec<usize> = history.iter().map(|m| m.epoch).collect();
        assert_eq!(indices, vec![0, 1]);
    }
}
