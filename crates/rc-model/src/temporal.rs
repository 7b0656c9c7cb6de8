//! Time-dependent vegetation torque profiles.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::strategy::ResistiveTorqueStrategy;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantTorque {
    pub torque: f64,
}

impl ResistiveTorqueStrategy for ConstantTorque {
    fn evaluate(&self, _t: f64) -> f64 {
        self.torque
    }

    fn label(&self) -> &str {
        "constant"
    }
}

/// `offset + amplitude·sin(2π·f·t + phase)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SinusoidalTorque {
    pub offset: f64,
    pub amplitude: f64,
    pub frequency_hz: f64,
    #[serde(default)]
    pub phase: f64,
}

impl ResistiveTorqueStrategy for SinusoidalTorque {
    fn evaluate(&self, t: f64) -> f64 {
        self.offset + self.amplitude * (2.0 * PI * self.frequency_hz * t + self.phase).sin()
    }

    fn label(&self) -> &str {
        "sinusoidal"
    }
}

/// `tau_initial` before `t_change`, `tau_final` from `t_change` on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepTorque {
    pub t_change: f64,
    pub tau_initial: f64,
    pub tau_final: f64,
}

impl ResistiveTorqueStrategy for StepTorque {
    fn evaluate(&self, t: f64) -> f64 {
        if t < self.t_change {
            self.tau_initial
        } else {
            self.tau_final
        }
    }

    fn label(&self) -> &str {
        "step"
    }
}

/// Linear ramp from `tau_initial` at `t_start` to `tau_final` at `t_end`,
/// held constant outside. A zero-length ramp degenerates to a step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RampTorque {
    pub t_start: f64,
    pub t_end: f64,
    pub tau_initial: f64,
    pub tau_final: f64,
}

impl ResistiveTorqueStrategy for RampTorque {
    fn evaluate(&self, t: f64) -> f64 {
        if t <= self.t_start {
            return if t < self.t_start || self.t_end > self.t_start {
                self.tau_initial
            } else {
                self.tau_final
            };
        }
        if t >= self.t_end {
            return self.tau_final;
        }
        let s = (t - self.t_start) / (self.t_end - self.t_start);
        self.tau_initial + (self.tau_final - self.tau_initial) * s
    }

    fn label(&self) -> &str {
        "ramp"
    }
}

/// First-order rise `tau_base + (tau_max − tau_base)(1 − e^{−t/τ})`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExponentialTorque {
    pub tau_base: f64,
    pub tau_max: f64,
    pub time_constant: f64,
}

impl ResistiveTorqueStrategy for ExponentialTorque {
    fn evaluate(&self, t: f64) -> f64 {
        if self.time_constant <= 0.0 {
            return if t > 0.0 { self.tau_max } else { self.tau_base };
        }
        self.tau_base + (self.tau_max - self.tau_base) * (1.0 - (-t / self.time_constant).exp())
    }

    fn label(&self) -> &str {
        "exponential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinusoid_quarter_period() {
        let s = SinusoidalTorque {
            offset: 10.0,
            amplitude: 5.0,
            frequency_hz: 0.5,
            phase: 0.0,
        };
        assert!((s.evaluate(0.0) - 10.0).abs() < 1e-12);
        assert!((s.evaluate(0.5) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn ramp_is_linear_inside_and_clamped_outside() {
        let r = RampTorque {
            t_start: 2.0,
            t_end: 6.0,
            tau_initial: 0.0,
            tau_final: 40.0,
        };
        assert_eq!(r.evaluate(0.0), 0.0);
        assert!((r.evaluate(3.0) - 10.0).abs() < 1e-12);
        assert_eq!(r.evaluate(6.0), 40.0);
        assert_eq!(r.evaluate(100.0), 40.0);
    }

    #[test]
    fn zero_length_ramp_is_a_step() {
        let r = RampTorque {
            t_start: 1.0,
            t_end: 1.0,
            tau_initial: 3.0,
            tau_final: 7.0,
        };
        assert_eq!(r.evaluate(0.5), 3.0);
        assert_eq!(r.evaluate(1.0), 7.0);
        assert!(r.evaluate(1.0).is_finite());
    }

    #[test]
    fn exponential_reaches_63_percent_at_time_constant() {
        let e = ExponentialTorque {
            tau_base: 0.0,
            tau_max: 100.0,
            time_constant: 2.0,
        };
        assert_eq!(e.evaluate(0.0), 0.0);
        let expected = 100.0 * (1.0 - (-1.0_f64).exp());
        assert!((e.evaluate(2.0) - expected).abs() < 1e-10);
        assert!(e.evaluate(1e3) <= 100.0);
    }
}
