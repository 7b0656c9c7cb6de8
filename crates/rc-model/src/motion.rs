//! Rigid-body rotation of the cutter.

use rc_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::params::ParameterSet;
use crate::torque::TorqueModel;

/// Angular state of the cutter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CutterState {
    /// Angle (rad)
    pub theta_rad: f64,
    /// Angular velocity (rad/s)
    pub omega_rad_s: f64,
}

impl CutterState {
    pub fn new(theta_rad: f64, omega_rad_s: f64) -> Self {
        Self {
            theta_rad,
            omega_rad_s,
        }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.theta_rad, self.omega_rad_s]
    }

    pub fn from_array(y: [f64; 2]) -> Self {
        Self::new(y[0], y[1])
    }
}

/// Plate and blade contributions to the total moment of inertia (kg·m²).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InertiaBreakdown {
    pub plate: f64,
    pub blades: f64,
    pub total: f64,
}

impl InertiaBreakdown {
    pub fn of(params: &ParameterSet) -> Self {
        let plate = params.plate_inertia;
        let total = params.total_inertia();
        Self {
            plate,
            blades: total - plate,
            total,
        }
    }
}

/// Moment of inertia of a solid disk about its axis, `½·m·R²`.
pub fn solid_disk_inertia(mass: f64, radius: f64) -> f64 {
    0.5 * mass * radius * radius
}

/// `½·I·ω²` (J).
pub fn kinetic_energy(inertia: f64, omega: f64) -> f64 {
    0.5 * inertia * omega * omega
}

/// `τ·ω` (W).
pub fn mechanical_power(torque: f64, omega: f64) -> f64 {
    torque * omega
}

/// First-order system `dθ/dt = ω`, `dω/dt = τ_net(t, ω) / I_total`.
///
/// The inertia is computed once at construction; construction fails when it
/// is not strictly positive and finite.
#[derive(Clone, Copy, Debug)]
pub struct EquationOfMotion<'a> {
    torque: TorqueModel<'a>,
    inertia: f64,
}

impl<'a> EquationOfMotion<'a> {
    pub fn new(params: &'a ParameterSet) -> ModelResult<Self> {
        let inertia = ensure_finite(params.total_inertia(), "total inertia")?;
        if inertia <= 0.0 {
            return Err(ModelError::Inconsistent {
                what: format!("total inertia {inertia} must be positive and finite"),
            });
        }
        Ok(Self {
            torque: TorqueModel::new(params),
            inertia,
        })
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn torque(&self) -> &TorqueModel<'a> {
        &self.torque
    }

    pub fn angular_acceleration(&self, t: f64, omega: f64) -> f64 {
        self.torque.net(t, omega) / self.inertia
    }

    pub fn derivative(&self, t: f64, state: CutterState) -> CutterState {
        CutterState {
            theta_rad: state.omega_rad_s,
            omega_rad_s: self.angular_acceleration(t, state.omega_rad_s),
        }
    }

    pub fn kinetic_energy(&self, omega: f64) -> f64 {
        kinetic_energy(self.inertia, omega)
    }
}
