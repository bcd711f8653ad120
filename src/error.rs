use thiserror::Error;

/// Failure kinds shared by every valuation operation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValuationError {
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("degenerate model: {0}")]
    DegenerateModel(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown stage: {0}")]
    UnknownStage(String),
    #[error("computation produced a non-finite result: {0}")]
    Computation(String),
    #[error("feature vector has {actual} entries, model expects {expected}")]
    FeatureMismatch { expected: usize, actual: usize },
    #[error("invalid model parameters: {0}")]
    InvalidModel(String),
}

pub type Result<T, E = ValuationError> = std::result::Result<T, E>;
