use std::{
    error::Error,
    fmt::{self, Display},
};

use regression::TrainErr;

use crate::normalize::Axis;

/// The result type used in the entire pipeline crate.
pub type Result<T> = std::result::Result<T, PipelineErr>;

/// Pipeline stage failures.
///
/// Every stage gates on valid input and returns early; a failed stage
/// leaves the downstream stages unrun rather than feeding them garbage.
/// Nothing here is retried.
#[derive(Debug)]
pub enum PipelineErr {
    /// The record endpoint could not be fetched or decoded.
    SourceUnavailable {
        url: String,
        source: reqwest::Error,
    },
    /// A stage received zero observations.
    EmptyDataset { stage: &'static str },
    /// An axis is constant, so min-max scaling it would divide by zero.
    DegenerateColumn { axis: Axis },
    /// The ML core rejected the fit.
    Train(TrainErr),
    /// The background fit task was cancelled or panicked.
    TaskJoin(tokio::task::JoinError),
    /// The run finished after a newer one had been submitted; its results
    /// are discarded, not merged.
    Superseded,
    /// A chart payload could not be encoded for hand-off.
    Encode(serde_json::Error),
}

impl Display for PipelineErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineErr::SourceUnavailable { url, source } => {
                write!(f, "record source {url} unavailable: {source}")
            }
            PipelineErr::EmptyDataset { stage } => {
                write!(f, "{stage} stage received zero observations")
            }
            PipelineErr::DegenerateColumn { axis } => {
                write!(f, "the {axis} axis is constant, cannot min-max scale it")
            }
            PipelineErr::Train(e) => write!(f, "training failed: {e}"),
            PipelineErr::TaskJoin(e) => write!(f, "training task died: {e}"),
            PipelineErr::Superseded => {
                write!(f, "run superseded by a newer submission")
            }
            PipelineErr::Encode(e) => write!(f, "chart encoding failed: {e}"),
        }
    }
}

impl Error for PipelineErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineErr::SourceUnavailable { source, .. } => Some(source),
            PipelineErr::Train(e) => Some(e),
            PipelineErr::TaskJoin(e) => Some(e),
            PipelineErr::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TrainErr> for PipelineErr {
    fn from(value: TrainErr) -> Self {
        Self::Train(value)
    }
}

impl From<tokio::task::JoinError> for PipelineErr {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::TaskJoin(value)
    }
}

impl From<serde_json::Error> for PipelineErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
