//! Run options.

use rc_model::ParameterLimits;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::tableau::{BOGACKI_SHAMPINE_32, DORMAND_PRINCE_54, Tableau};

/// Embedded Runge–Kutta pair used by the adaptive solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Dormand–Prince 5(4), 7 evaluations per step (6 with reuse).
    #[default]
    #[serde(alias = "rk45")]
    Rk45,
    /// Bogacki–Shampine 3(2), cheaper for loose tolerances.
    #[serde(alias = "rk23")]
    Rk23,
}

impl Method {
    pub fn tableau(self) -> &'static Tableau {
        match self {
            Self::Rk45 => &DORMAND_PRINCE_54,
            Self::Rk23 => &BOGACKI_SHAMPINE_32,
        }
    }
}

/// Options for simulation runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    /// Start time (seconds)
    pub t_start: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Number of evenly spaced output samples over `[t_start, t_end]`
    pub sample_count: usize,
    pub method: Method,
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Upper bound on the internal step (seconds); unbounded when `None`
    pub max_step: Option<f64>,
    /// Initial step (seconds); chosen from the derivatives when `None`
    pub first_step: Option<f64>,
    /// Maximum number of right-hand-side evaluations (safety limit)
    pub max_evaluations: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_end: 10.0,
            sample_count: 1000,
            method: Method::default(),
            rtol: 1e-8,
            atol: 1e-10,
            max_step: None,
            first_step: None,
            max_evaluations: 500_000,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.t_start.is_finite() && self.t_end.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "time span must be finite",
            });
        }
        if self.t_end <= self.t_start {
            return Err(SimError::InvalidArg {
                what: "t_end must be greater than t_start",
            });
        }
        if self.sample_count < 10 {
            return Err(SimError::InvalidArg {
                what: "sample_count must be at least 10",
            });
        }
        if !(self.rtol > 0.0 && self.atol > 0.0) {
            return Err(SimError::InvalidArg {
                what: "tolerances must be positive",
            });
        }
        if self.max_step.is_some_and(|h| !(h > 0.0)) {
            return Err(SimError::InvalidArg {
                what: "max_step must be positive",
            });
        }
        if self.first_step.is_some_and(|h| !(h > 0.0 && h.is_finite())) {
            return Err(SimError::InvalidArg {
                what: "first_step must be positive and finite",
            });
        }
        if self.max_evaluations == 0 {
            return Err(SimError::InvalidArg {
                what: "max_evaluations must be positive",
            });
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus the run-length bound from `limits`.
    pub fn validate_with(&self, limits: &ParameterLimits) -> SimResult<()> {
        self.validate()?;
        if self.t_end - self.t_start > limits.max_simulation_time {
            return Err(SimError::InvalidArg {
                what: "simulated span exceeds the configured maximum",
            });
        }
        Ok(())
    }
}
