use std::fmt::{self, Display};

use crate::{
    clean::Observation,
    error::{PipelineErr, Result},
};

/// Which axis of an observation pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Input,
    Label,
}

impl Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Input => write!(f, "input (x)"),
            Axis::Label => write!(f, "label (y)"),
        }
    }
}

/// Per-axis min-max bounds of one training run.
///
/// Derived once over the full observation set and kept around so
/// normalized predictions can be mapped back to original units. Owned by
/// the run that derived them; never reused across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    pub input_min: f32,
    pub input_max: f32,
    pub label_min: f32,
    pub label_max: f32,
}

impl ScaleParams {
    pub fn normalize_input(&self, v: f32) -> f32 {
        (v - self.input_min) / (self.input_max - self.input_min)
    }

    pub fn normalize_label(&self, v: f32) -> f32 {
        (v - self.label_min) / (self.label_max - self.label_min)
    }

    /// Inverts `normalize_input`.
    pub fn denormalize_input(&self, v: f32) -> f32 {
        v * (self.input_max - self.input_min) + self.input_min
    }

    /// Inverts `normalize_label`.
    pub fn denormalize_label(&self, v: f32) -> f32 {
        v * (self.label_max - self.label_min) + self.label_min
    }
}

/// An observation with both components rescaled to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedObservation {
    pub x: f32,
    pub y: f32,
}

/// Min-max rescales every observation to [0, 1] per axis and returns the
/// bounds used, so the caller can invert results later.
///
/// # Errors
/// `EmptyDataset` for zero observations. `DegenerateColumn` when an axis
/// is constant: rescaling it would divide by zero.
pub fn normalize(
    observations: &[Observation],
) -> Result<(Vec<NormalizedObservation>, ScaleParams)> {
    if observations.is_empty() {
        return Err(PipelineErr::EmptyDataset { stage: "normalize" });
    }

    let mut params = ScaleParams {
        input_min: f32::INFINITY,
        input_max: f32::NEG_INFINITY,
        label_min: f32::INFINITY,
        label_max: f32::NEG_INFINITY,
    };
    for obs in observations {
        params.input_min = params.input_min.min(obs.x);
        params.input_max = params.input_max.max(obs.x);
        params.label_min = params.label_min.min(obs.y);
        params.label_max = params.label_max.max(obs.y);
    }

    if params.input_min == params.input_max {
        return Err(PipelineErr::DegenerateColumn { axis: Axis::Input });
    }
    if params.label_min == params.label_max {
        return Err(PipelineErr::DegenerateColumn { axis: Axis::Label });
    }

    let normalized = observations
        .iter()
        .map(|obs| NormalizedObservation {
            x: params.normalize_input(obs.x),
            y: params.normalize_label(obs.y),
        })
        .collect();

    Ok((normalized, params))
}
