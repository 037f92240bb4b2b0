use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire regression crate.
pub type Result<T> = std::result::Result<T, TrainErr>;

/// Failures while assembling a dataset or fitting a model.
#[derive(Debug)]
pub enum TrainErr {
    /// A fit was requested over zero samples. Rejected before any tensor
    /// is built.
    EmptyDataset,
    LengthMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
}

impl Display for TrainErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainErr::EmptyDataset => {
                write!(f, "cannot fit over an empty dataset")
            }
            TrainErr::LengthMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "length mismatch in {what}: got {got}, expected {expected}"
            ),
        }
    }
}

impl Error for TrainErr {}
