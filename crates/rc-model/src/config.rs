//! Percent-based cutter description, as written in run files.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult, check_range};
use crate::limits::ParameterLimits;
use crate::motion::solid_disk_inertia;
use crate::params::ParameterSet;
use crate::spatial::{DensityProfile, SpatialTorque};
use crate::strategy::TorqueProfile;

/// Cutter as a designer describes it: total mass and percentage splits rather
/// than inertias.
///
/// `vegetation_profile` binds a density field to this cutter's grass
/// resistance, radius and advance speed; `torque_profile` gives the
/// vegetation torque directly. At most one may be set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutterConfig {
    pub name: String,
    pub description: String,
    /// m
    pub radius: f64,
    /// Blade length as a percentage of `radius`.
    pub blade_length_percent: f64,
    /// m
    pub cutting_width: f64,
    /// kg
    pub total_mass: f64,
    /// Share of `total_mass` in the plate; the rest is split over the blades.
    pub plate_mass_percent: f64,
    pub n_blades: u32,
    pub input_torque: f64,
    pub viscous_friction: f64,
    pub aerodynamic_drag: f64,
    pub vegetation_density: f64,
    pub grass_resistance: f64,
    pub advance_velocity: f64,
    /// s
    pub simulation_time: f64,
    pub time_points: usize,
    pub torque_profile: Option<TorqueProfile>,
    pub vegetation_profile: Option<DensityProfile>,
}

impl Default for CutterConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: String::new(),
            radius: 0.6,
            blade_length_percent: 30.0,
            cutting_width: 1.8,
            total_mass: 15.0,
            plate_mass_percent: 40.0,
            n_blades: 2,
            input_torque: 200.0,
            viscous_friction: 0.1,
            aerodynamic_drag: 0.01,
            vegetation_density: 1.0,
            grass_resistance: 15.0,
            advance_velocity: 3.0,
            simulation_time: 10.0,
            time_points: 1000,
            torque_profile: None,
            vegetation_profile: None,
        }
    }
}

impl CutterConfig {
    /// Derive physical parameters and validate them against `limits`.
    ///
    /// - `L = R·blade_length_percent/100`
    /// - plate mass `= m·plate_mass_percent/100`, `I_plate = ½·m_plate·R²`
    /// - `m_c = (m − m_plate)/n_blades`
    pub fn to_parameter_set(&self, limits: &ParameterLimits) -> ModelResult<ParameterSet> {
        check_range("plate_mass_percent", self.plate_mass_percent, 0.0, 100.0)?;
        check_range("total_mass", self.total_mass, 0.0, f64::MAX)?;
        if self.n_blades == 0 {
            return Err(ModelError::OutOfRange {
                field: "n_blades",
                value: 0.0,
                min: limits.min_blades as f64,
                max: limits.max_blades as f64,
            });
        }

        let plate_mass = self.total_mass * self.plate_mass_percent / 100.0;
        let mut builder = ParameterSet::builder()
            .radius(self.radius)
            .blade_length(self.radius * self.blade_length_percent / 100.0)
            .cutting_width(self.cutting_width)
            .plate_inertia(solid_disk_inertia(plate_mass, self.radius))
            .blade_mass((self.total_mass - plate_mass) / self.n_blades as f64)
            .n_blades(self.n_blades)
            .input_torque(self.input_torque)
            .viscous_coeff(self.viscous_friction)
            .drag_coeff(self.aerodynamic_drag)
            .vegetation_density(self.vegetation_density)
            .grass_resistance(self.grass_resistance)
            .advance_speed(self.advance_velocity);

        match (&self.torque_profile, &self.vegetation_profile) {
            (Some(_), Some(_)) => {
                return Err(ModelError::Inconsistent {
                    what: "torque_profile and vegetation_profile are mutually exclusive".to_string(),
                });
            }
            (Some(profile), None) => builder = builder.resistive_torque(profile.clone()),
            (None, Some(density)) => {
                builder = builder.resistive_torque(SpatialTorque {
                    density: density.clone(),
                    k_grass: self.grass_resistance,
                    radius: self.radius,
                    advance_speed: self.advance_velocity,
                })
            }
            (None, None) => {}
        }
        builder.build(limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::ConstantTorque;

    #[test]
    fn default_config_derivation() {
        let p = CutterConfig::default()
            .to_parameter_set(&ParameterLimits::default())
            .unwrap();
        assert!((p.blade_length - 0.18).abs() < 1e-12);
        // plate mass 6 kg, solid disk
        assert!((p.plate_inertia - 0.5 * 6.0 * 0.36).abs() < 1e-12);
        assert!((p.blade_mass - 4.5).abs() < 1e-12);
        assert!((p.constant_vegetation_torque() - 15.0 * 1.0 * 3.0 * 0.6).abs() < 1e-12);
    }

    #[test]
    fn zero_blades_rejected_before_division() {
        let cfg = CutterConfig {
            n_blades: 0,
            ..CutterConfig::default()
        };
        let err = cfg.to_parameter_set(&ParameterLimits::default()).unwrap_err();
        assert_eq!(err.field(), Some("n_blades"));
    }

    #[test]
    fn vegetation_profile_binds_cutter_geometry() {
        let cfg = CutterConfig {
            vegetation_profile: Some(DensityProfile::Uniform { density: 2.0 }),
            ..CutterConfig::default()
        };
        let p = cfg.to_parameter_set(&ParameterLimits::default()).unwrap();
        assert_eq!(p.vegetation_label(), "spatial:uniform");
        let torque = crate::TorqueModel::new(&p).vegetation(3.0);
        assert!((torque - 15.0 * 2.0 * 0.6).abs() < 1e-12);
    }

    #[test]
    fn both_profiles_is_inconsistent() {
        let cfg = CutterConfig {
            torque_profile: Some(TorqueProfile::Constant(ConstantTorque { torque: 5.0 })),
            vegetation_profile: Some(DensityProfile::Uniform { density: 2.0 }),
            ..CutterConfig::default()
        };
        assert!(matches!(
            cfg.to_parameter_set(&ParameterLimits::default()),
            Err(ModelError::Inconsistent { .. })
        ));
    }

    #[test]
    fn yaml_overrides_only_named_fields() {
        let yaml = "\
name: heavy
total_mass: 25.0
torque_profile:
  kind: constant
  torque: 12.0
";
        let cfg: CutterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.name, "heavy");
        assert_eq!(cfg.radius, 0.6);
        let p = cfg.to_parameter_set(&ParameterLimits::default()).unwrap();
        assert_eq!(p.vegetation_label(), "constant");
        assert!((p.blade_mass - 7.5).abs() < 1e-12);
    }
}
