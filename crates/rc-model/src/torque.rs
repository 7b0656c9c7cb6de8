//! Torques acting on the cutter shaft.

use rc_core::sign;
use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

/// The four torque terms at one instant, plus their sum (N·m).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TorqueBreakdown {
    pub input: f64,
    pub friction: f64,
    pub drag: f64,
    pub vegetation: f64,
    /// `input − friction − drag − vegetation`
    pub net: f64,
}

/// Torque model over a borrowed parameter set. Every method is pure.
#[derive(Clone, Copy, Debug)]
pub struct TorqueModel<'a> {
    params: &'a ParameterSet,
}

impl<'a> TorqueModel<'a> {
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &'a ParameterSet {
        self.params
    }

    pub fn input(&self) -> f64 {
        self.params.input_torque
    }

    /// Viscous friction `b·ω`.
    pub fn friction(&self, omega: f64) -> f64 {
        self.params.viscous_coeff * omega
    }

    /// Quadratic drag `c·ω²·sign(ω)`, zero at rest.
    pub fn drag(&self, omega: f64) -> f64 {
        self.params.drag_coeff * omega * omega * sign(omega)
    }

    /// Vegetation resistance at time `t`.
    pub fn vegetation(&self, t: f64) -> f64 {
        match &self.params.resistive_torque {
            Some(strategy) => strategy.evaluate(t),
            None => self.params.constant_vegetation_torque(),
        }
    }

    pub fn net(&self, t: f64, omega: f64) -> f64 {
        self.input() - self.friction(omega) - self.drag(omega) - self.vegetation(t)
    }

    pub fn breakdown(&self, t: f64, omega: f64) -> TorqueBreakdown {
        let input = self.input();
        let friction = self.friction(omega);
        let drag = self.drag(omega);
        let vegetation = self.vegetation(t);
        TorqueBreakdown {
            input,
            friction,
            drag,
            vegetation,
            net: input - friction - drag - vegetation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::StepTorque;

    #[test]
    fn breakdown_sums_to_net() {
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0);
        let model = TorqueModel::new(&p);
        let b = model.breakdown(1.0, 50.0);
        assert!((b.friction - 5.0).abs() < 1e-12);
        assert!((b.drag - 25.0).abs() < 1e-12);
        assert!((b.vegetation - 6.0).abs() < 1e-12);
        assert!((b.net - (200.0 - 5.0 - 25.0 - 6.0)).abs() < 1e-12);
        assert_eq!(b.net, model.net(1.0, 50.0));
    }

    #[test]
    fn drag_is_zero_and_finite_at_rest() {
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0);
        let model = TorqueModel::new(&p);
        assert_eq!(model.drag(0.0), 0.0);
        assert_eq!(model.drag(-0.0), 0.0);
        assert!(model.net(0.0, 0.0).is_finite());
    }

    #[test]
    fn strategy_replaces_constant_vegetation() {
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0).with_resistive_torque(StepTorque {
            t_change: 5.0,
            tau_initial: 5.0,
            tau_final: 20.0,
        });
        let model = TorqueModel::new(&p);
        assert_eq!(model.vegetation(4.0), 5.0);
        assert_eq!(model.vegetation(6.0), 20.0);
    }
}
