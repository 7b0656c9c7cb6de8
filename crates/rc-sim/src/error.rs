//! Error types for simulation runs.

use rc_model::ModelError;
use thiserror::Error;

use crate::solver::SolveStats;

/// Errors encountered while setting up or integrating a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid parameters: {0}")]
    Model(#[from] ModelError),

    #[error("Step size underflow at t={t} s (h={h:e})")]
    StepSizeUnderflow { t: f64, h: f64 },

    #[error("Evaluation budget of {budget} exhausted at t={t} s")]
    BudgetExhausted { budget: usize, t: f64 },

    #[error("Non-finite derivative at t={t} s")]
    NonFinite { t: f64 },
}

pub type SimResult<T> = Result<T, SimError>;

/// A solve that stopped early, with the work done up to that point.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct SolveFailure {
    pub error: SimError,
    pub stats: SolveStats,
}

impl From<SimError> for SolveFailure {
    fn from(error: SimError) -> Self {
        Self {
            error,
            stats: SolveStats::default(),
        }
    }
}

impl SimError {
    /// Integration failures are reported on a failed trajectory rather than
    /// returned, so a batch keeps going. Everything else is a caller error.
    pub fn is_integration_failure(&self) -> bool {
        matches!(
            self,
            Self::StepSizeUnderflow { .. } | Self::BudgetExhausted { .. } | Self::NonFinite { .. }
        )
    }
}
