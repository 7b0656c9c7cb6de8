//! Sampled result of one run.

use rc_core::{max, mean, min, rms, trapezoid};
use rc_model::{CutterState, ParameterSet};
use serde::{Deserialize, Serialize};

use crate::options::SimOptions;
use crate::solver::SolveStats;

/// Samples of one run plus the metadata needed to reproduce it.
///
/// On failure `success` is false, `message` says why, and every series is
/// empty. Created once by [`crate::simulate_with`]; not mutated afterwards.
#[derive(Clone, Debug)]
pub struct Trajectory {
    /// s, strictly increasing
    pub time: Vec<f64>,
    /// rad
    pub theta: Vec<f64>,
    /// rad/s
    pub omega: Vec<f64>,
    /// Net shaft torque, N·m
    pub torque: Vec<f64>,
    /// `torque·ω`, W
    pub power: Vec<f64>,
    /// `½·I·ω²`, J
    pub kinetic_energy: Vec<f64>,
    pub success: bool,
    pub message: String,
    /// Right-hand-side evaluations
    pub n_evaluations: usize,
    pub stats: SolveStats,
    /// Wall-clock duration of the solve, s
    pub wall_time_s: f64,
    pub parameters: ParameterSet,
    pub initial_state: CutterState,
    pub options: SimOptions,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn final_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    pub fn final_state(&self) -> Option<CutterState> {
        Some(CutterState::new(*self.theta.last()?, *self.omega.last()?))
    }

    /// Summary of the sampled series. All zero for a failed run.
    pub fn statistics(&self) -> RunStatistics {
        if !self.success || self.is_empty() {
            return RunStatistics::default();
        }
        let abs_max = |x: &[f64]| x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        RunStatistics {
            duration: self.time[self.len() - 1] - self.time[0],
            angle_range: max(&self.theta) - min(&self.theta),
            omega_abs_max: abs_max(&self.omega),
            omega_rms: rms(&self.omega),
            torque_abs_max: abs_max(&self.torque),
            torque_rms: rms(&self.torque),
            power_avg: mean(&self.power),
            power_max: max(&self.power),
            kinetic_energy_avg: mean(&self.kinetic_energy),
            kinetic_energy_final: self.kinetic_energy[self.len() - 1],
            net_work: trapezoid(&self.power, &self.time).unwrap_or(0.0),
        }
    }
}

/// Descriptive statistics of a trajectory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub duration: f64,
    pub angle_range: f64,
    pub omega_abs_max: f64,
    pub omega_rms: f64,
    pub torque_abs_max: f64,
    pub torque_rms: f64,
    pub power_avg: f64,
    pub power_max: f64,
    pub kinetic_energy_avg: f64,
    pub kinetic_energy_final: f64,
    /// `∫ torque·ω dt`, J
    pub net_work: f64,
}
