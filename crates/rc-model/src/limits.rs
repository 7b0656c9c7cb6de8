//! Validation bounds, injected into every check instead of module constants.

use serde::{Deserialize, Serialize};

/// Physical bounds a [`crate::ParameterSet`] and its run options must respect.
///
/// Deserializes with `#[serde(default)]`, so a configuration file only needs
/// to name the bounds it tightens or relaxes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterLimits {
    pub min_radius: f64,
    pub max_radius: f64,
    /// Largest allowed `blade_length / radius`.
    pub max_length_ratio: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub min_plate_inertia: f64,
    pub max_plate_inertia: f64,
    pub min_blade_mass: f64,
    pub max_blade_mass: f64,
    pub min_blades: u32,
    pub max_blades: u32,
    pub min_input_torque: f64,
    pub max_input_torque: f64,
    pub max_viscous: f64,
    pub max_drag: f64,
    pub max_density: f64,
    pub max_grass_resistance: f64,
    pub max_advance_speed: f64,
    /// Upper bound on any resistive torque strategy output, N·m.
    pub max_strategy_torque: f64,
    /// Times at which strategies are sampled during validation, s.
    pub strategy_sample_times: Vec<f64>,
    pub max_angular_velocity: f64,
    pub max_simulation_time: f64,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        Self {
            min_radius: 0.01,
            max_radius: 5.0,
            max_length_ratio: 2.0,
            min_width: 0.1,
            max_width: 10.0,
            min_plate_inertia: 1e-6,
            max_plate_inertia: 1000.0,
            min_blade_mass: 0.1,
            max_blade_mass: 1000.0,
            min_blades: 1,
            max_blades: 12,
            min_input_torque: 0.1,
            max_input_torque: 10_000.0,
            max_viscous: 100.0,
            max_drag: 10.0,
            max_density: 10.0,
            max_grass_resistance: 1000.0,
            max_advance_speed: 20.0,
            max_strategy_torque: 10_000.0,
            strategy_sample_times: vec![0.0, 1.0, 5.0, 10.0],
            max_angular_velocity: 1000.0,
            max_simulation_time: 3600.0,
        }
    }
}
