use rc_core::CoreError;
use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown metric: {name}")]
    UnknownMetric { name: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
