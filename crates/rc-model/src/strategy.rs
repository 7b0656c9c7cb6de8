//! Resistive torque strategies.
//!
//! A strategy maps simulation time to the vegetation torque opposing the
//! cutter. Implementations must be pure: the integrator evaluates them at
//! arbitrary, non-monotone trial times.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::spatial::SpatialTorque;
use crate::temporal::{ConstantTorque, ExponentialTorque, RampTorque, SinusoidalTorque, StepTorque};

pub trait ResistiveTorqueStrategy: fmt::Debug + Send + Sync {
    /// Resistive torque in N·m at time `t` (s). Expected finite and `>= 0`.
    fn evaluate(&self, t: f64) -> f64;

    /// Short name used in logs and validation errors.
    fn label(&self) -> &str {
        "custom"
    }
}

/// Strategy shared between a parameter set and its clones.
pub type SharedStrategy = Arc<dyn ResistiveTorqueStrategy>;

/// Adapter turning a closure into a strategy.
pub struct FnTorque<F> {
    label: String,
    f: F,
}

impl<F> FnTorque<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    pub fn new(label: impl Into<String>, f: F) -> Self {
        Self {
            label: label.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnTorque<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTorque").field("label", &self.label).finish()
    }
}

impl<F> ResistiveTorqueStrategy for FnTorque<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn evaluate(&self, t: f64) -> f64 {
        (self.f)(t)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Serializable choice of a built-in strategy, selected at configuration time.
///
/// ```yaml
/// kind: step
/// t_change: 5.0
/// tau_initial: 5.0
/// tau_final: 20.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TorqueProfile {
    Constant(ConstantTorque),
    Sinusoidal(SinusoidalTorque),
    Step(StepTorque),
    Ramp(RampTorque),
    Exponential(ExponentialTorque),
    Spatial(SpatialTorque),
}

impl ResistiveTorqueStrategy for TorqueProfile {
    fn evaluate(&self, t: f64) -> f64 {
        match self {
            Self::Constant(p) => p.evaluate(t),
            Self::Sinusoidal(p) => p.evaluate(t),
            Self::Step(p) => p.evaluate(t),
            Self::Ramp(p) => p.evaluate(t),
            Self::Exponential(p) => p.evaluate(t),
            Self::Spatial(p) => p.evaluate(t),
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Constant(p) => p.label(),
            Self::Sinusoidal(p) => p.label(),
            Self::Step(p) => p.label(),
            Self::Ramp(p) => p.label(),
            Self::Exponential(p) => p.label(),
            Self::Spatial(p) => p.label(),
        }
    }
}
