//! Initial angular state of a run.

use std::f64::consts::TAU;

use rc_core::units::{deg_to_rad, rpm_to_rad_per_s};
use serde::{Deserialize, Serialize};

use crate::error::{ModelResult, check_range};
use crate::limits::ParameterLimits;
use crate::motion::CutterState;

/// How the cutter is moving at `t_start`. Angles are radians unless the field
/// name says otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialCondition {
    Stationary {
        #[serde(default)]
        angle: f64,
    },
    FromRpm {
        rpm: f64,
        #[serde(default)]
        angle: f64,
    },
    BladeAngle {
        blade_angle_deg: f64,
        #[serde(default)]
        angular_velocity: f64,
    },
    /// Motor already partly spun up: `ω₀ = target_rpm·2π/60·startup_efficiency`.
    Spinning {
        target_rpm: f64,
        startup_efficiency: f64,
        #[serde(default)]
        angle: f64,
    },
    Custom {
        angle: f64,
        angular_velocity: f64,
    },
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self::Stationary { angle: 0.0 }
    }
}

impl InitialCondition {
    /// Raw state, before validation.
    pub fn state(&self) -> CutterState {
        match *self {
            Self::Stationary { angle } => CutterState::new(angle, 0.0),
            Self::FromRpm { rpm, angle } => CutterState::new(angle, rpm_to_rad_per_s(rpm)),
            Self::BladeAngle {
                blade_angle_deg,
                angular_velocity,
            } => CutterState::new(deg_to_rad(blade_angle_deg), angular_velocity),
            Self::Spinning {
                target_rpm,
                startup_efficiency,
                angle,
            } => CutterState::new(angle, rpm_to_rad_per_s(target_rpm) * startup_efficiency),
            Self::Custom {
                angle,
                angular_velocity,
            } => CutterState::new(angle, angular_velocity),
        }
    }

    /// State checked against `limits`: finite, `|θ| ≤ 2π`, `|ω| ≤ max_angular_velocity`.
    pub fn resolve(&self, limits: &ParameterLimits) -> ModelResult<CutterState> {
        if let Self::Spinning {
            startup_efficiency, ..
        } = *self
        {
            check_range("startup_efficiency", startup_efficiency, 0.0, 1.0)?;
        }
        let state = self.state();
        validate_state(state, limits)?;
        Ok(state)
    }
}

/// Range checks shared by every way of specifying a starting state.
pub fn validate_state(state: CutterState, limits: &ParameterLimits) -> ModelResult<()> {
    check_range("initial_angle", state.theta_rad, -TAU, TAU)?;
    let w = limits.max_angular_velocity;
    check_range("initial_angular_velocity", state.omega_rad_s, -w, w)?;
    Ok(())
}
