use serde::Serialize;

use regression::training::TrainingHistory;

use crate::{
    clean::Observation,
    error::{PipelineErr, Result},
};

/// Padding applied beyond the data bounds on scatter axes, in axis units.
const AXIS_PADDING: f32 = 5.0;

/// One display point, in the `{x, y}` shape charting widgets expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// How a series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Scatter,
    Line,
}

/// Display options for one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisOptions {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f32>,
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_fraction_digits: Option<u8>,
}

impl AxisOptions {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            min: None,
            max: None,
            begin_at_zero: false,
            tick_fraction_digits: None,
        }
    }
}

/// A named, ordered series plus the axis options to render it with.
///
/// This is the hand-off boundary: the rendering widget is an external
/// collaborator and receives pure data.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub label: String,
    pub kind: SeriesKind,
    pub points: Vec<Point>,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
}

/// Builds the observation scatter: every cleaned point, each axis padded
/// five units beyond the data bounds.
///
/// # Errors
/// `EmptyDataset` when there are no observations; there are no bounds to
/// pad around.
pub fn scatter_series(
    label: &str,
    observations: &[Observation],
    x_title: &str,
    y_title: &str,
) -> Result<Series> {
    series_of(label, SeriesKind::Scatter, observations, x_title, y_title)
}

/// Builds the fitted-line series in original units: same shape as the
/// scatter, drawn as a line.
pub fn prediction_series(
    label: &str,
    predictions: &[Observation],
    x_title: &str,
    y_title: &str,
) -> Result<Series> {
    series_of(label, SeriesKind::Line, predictions, x_title, y_title)
}

fn series_of(
    label: &str,
    kind: SeriesKind,
    observations: &[Observation],
    x_title: &str,
    y_title: &str,
) -> Result<Series> {
    if observations.is_empty() {
        return Err(PipelineErr::EmptyDataset { stage: "chart" });
    }

    let mut x_min = f32::INFINITY;
    let mut x_max = f32::NEG_INFINITY;
    let mut y_min = f32::INFINITY;
    let mut y_max = f32::NEG_INFINITY;
    for obs in observations {
        x_min = x_min.min(obs.x);
        x_max = x_max.max(obs.x);
        y_min = y_min.min(obs.y);
        y_max = y_max.max(obs.y);
    }

    let mut x_axis = AxisOptions::titled(x_title);
    x_axis.min = Some(x_min - AXIS_PADDING);
    x_axis.max = Some(x_max + AXIS_PADDING);
    let mut y_axis = AxisOptions::titled(y_title);
    y_axis.min = Some(y_min - AXIS_PADDING);
    y_axis.max = Some(y_max + AXIS_PADDING);

    Ok(Series {
        label: label.to_owned(),
        kind,
        points: observations
            .iter()
            .map(|obs| Point { x: obs.x, y: obs.y })
            .collect(),
        x_axis,
        y_axis,
    })
}

/// Builds the epoch-to-mse line from a fit's history. The y axis begins
/// at zero and keeps one fraction digit on its ticks.
pub fn history_series(label: &str, history: &TrainingHistory) -> Series {
    let mut y_axis = AxisOptions::titled("Value");
    y_axis.begin_at_zero = true;
    y_axis.tick_fraction_digits = Some(1);

    Series {
        label: label.to_owned(),
        kind: SeriesKind::Line,
        points: history
            .iter()
            .map(|metrics| Point {
                x: metrics.epoch as f32,
                y: metrics.mse,
            })
            .collect(),
        x_axis: AxisOptions::titled("Epoch"),
        y_axis,
    }
}
