//! Physical parameters of one cutter run.

use std::sync::Arc;

use tracing::warn;

use crate::error::{ModelError, ModelResult, check_range};
use crate::limits::ParameterLimits;
use crate::strategy::{ResistiveTorqueStrategy, SharedStrategy};

/// All constants needed to integrate one run (SI units).
///
/// Fields are public and the record is immutable by convention: build it with
/// [`ParameterSet::builder`] or [`ParameterSet::from_basic`], then call
/// [`ParameterSet::validate`] once before simulating.
#[derive(Clone, Debug)]
pub struct ParameterSet {
    /// Plate radius R (m)
    pub radius: f64,
    /// Blade length L beyond the plate rim (m)
    pub blade_length: f64,
    /// Cutting width w (m)
    pub cutting_width: f64,
    /// Plate moment of inertia (kg·m²)
    pub plate_inertia: f64,
    /// Mass of one blade (kg)
    pub blade_mass: f64,
    pub n_blades: u32,
    /// Motor torque (N·m)
    pub input_torque: f64,
    /// Viscous friction coefficient b (N·m·s/rad)
    pub viscous_coeff: f64,
    /// Quadratic drag coefficient (N·m·s²/rad²)
    pub drag_coeff: f64,
    /// Vegetation density (kg/m²)
    pub vegetation_density: f64,
    /// Grass cutting resistance k_grass (N·s/m)
    pub grass_resistance: f64,
    /// Forward speed of the implement (m/s)
    pub advance_speed: f64,
    /// Replaces the constant vegetation torque when present.
    pub resistive_torque: Option<SharedStrategy>,
}

impl ParameterSet {
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    /// Typical cutter derived from three headline figures.
    ///
    /// 40% of `mass` goes into the plate (`I_plate = 0.4·m·R²`), 30% is shared
    /// by two blades of length `0.3·R`. The remaining fields take moderate
    /// field-work values.
    pub fn from_basic(mass: f64, radius: f64, input_torque: f64) -> Self {
        let n_blades = 2;
        Self {
            radius,
            blade_length: 0.3 * radius,
            cutting_width: 1.8,
            plate_inertia: 0.4 * mass * radius * radius,
            blade_mass: 0.3 * mass / n_blades as f64,
            n_blades,
            input_torque,
            viscous_coeff: 0.1,
            drag_coeff: 0.01,
            vegetation_density: 0.5,
            grass_resistance: 10.0,
            advance_speed: 2.0,
            resistive_torque: None,
        }
    }

    /// Same parameters with `strategy` driving the vegetation torque.
    pub fn with_resistive_torque(mut self, strategy: impl ResistiveTorqueStrategy + 'static) -> Self {
        self.resistive_torque = Some(Arc::new(strategy));
        self
    }

    /// `I_total = I_plate + n·m_c·(R + L)²`.
    pub fn total_inertia(&self) -> f64 {
        let arm = self.radius + self.blade_length;
        self.plate_inertia + self.n_blades as f64 * self.blade_mass * arm * arm
    }

    /// Vegetation torque used when no strategy is set: `k·ρ·v·R`.
    pub fn constant_vegetation_torque(&self) -> f64 {
        self.grass_resistance * self.vegetation_density * self.advance_speed * self.radius
    }

    /// Label of the active vegetation model, for logs and reports.
    pub fn vegetation_label(&self) -> &str {
        match &self.resistive_torque {
            Some(s) => s.label(),
            None => "constant",
        }
    }

    /// Check every field against `limits`. Values are reported, never clamped.
    pub fn validate(&self, limits: &ParameterLimits) -> ModelResult<()> {
        check_range("radius", self.radius, limits.min_radius, limits.max_radius)?;
        check_range(
            "blade_length",
            self.blade_length,
            0.0,
            limits.max_length_ratio * self.radius,
        )?;
        check_range("cutting_width", self.cutting_width, limits.min_width, limits.max_width)?;
        check_range(
            "plate_inertia",
            self.plate_inertia,
            limits.min_plate_inertia,
            limits.max_plate_inertia,
        )?;
        check_range(
            "blade_mass",
            self.blade_mass,
            limits.min_blade_mass,
            limits.max_blade_mass,
        )?;
        check_range(
            "n_blades",
            self.n_blades as f64,
            limits.min_blades as f64,
            limits.max_blades as f64,
        )?;
        check_range(
            "input_torque",
            self.input_torque,
            limits.min_input_torque,
            limits.max_input_torque,
        )?;
        check_range("viscous_coeff", self.viscous_coeff, 0.0, limits.max_viscous)?;
        check_range("drag_coeff", self.drag_coeff, 0.0, limits.max_drag)?;
        check_range(
            "vegetation_density",
            self.vegetation_density,
            0.0,
            limits.max_density,
        )?;
        check_range(
            "grass_resistance",
            self.grass_resistance,
            0.0,
            limits.max_grass_resistance,
        )?;
        check_range(
            "advance_speed",
            self.advance_speed,
            0.0,
            limits.max_advance_speed,
        )?;

        let total = self.total_inertia();
        if !(total.is_finite() && total > 0.0) {
            return Err(ModelError::Inconsistent {
                what: format!("total inertia {total} must be positive and finite"),
            });
        }

        let blade_reference = 10.0 * self.blade_mass * self.radius * self.radius;
        if self.plate_inertia > blade_reference {
            warn!(
                plate_inertia = self.plate_inertia,
                blade_reference, "plate inertia dominates blade inertia by more than 10x"
            );
        }

        if let Some(strategy) = &self.resistive_torque {
            check_strategy(strategy.as_ref(), limits)?;
        }
        Ok(())
    }
}

fn check_strategy(strategy: &dyn ResistiveTorqueStrategy, limits: &ParameterLimits) -> ModelResult<()> {
    for &t in &limits.strategy_sample_times {
        let value = strategy.evaluate(t);
        let reason = if !value.is_finite() {
            "not finite"
        } else if value < 0.0 {
            "negative"
        } else if value > limits.max_strategy_torque {
            "exceeds the strategy torque limit"
        } else {
            continue;
        };
        return Err(ModelError::Strategy {
            label: strategy.label().to_string(),
            t,
            value,
            reason,
        });
    }
    Ok(())
}

/// Incremental construction of a [`ParameterSet`].
///
/// Every physical field must be set; `n_blades` defaults to 2.
#[derive(Clone, Debug, Default)]
pub struct ParameterSetBuilder {
    radius: Option<f64>,
    blade_length: Option<f64>,
    cutting_width: Option<f64>,
    plate_inertia: Option<f64>,
    blade_mass: Option<f64>,
    n_blades: Option<u32>,
    input_torque: Option<f64>,
    viscous_coeff: Option<f64>,
    drag_coeff: Option<f64>,
    vegetation_density: Option<f64>,
    grass_resistance: Option<f64>,
    advance_speed: Option<f64>,
    resistive_torque: Option<SharedStrategy>,
}

macro_rules! setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, value: $ty) -> Self {
                self.$name = Some(value);
                self
            }
        )*
    };
}

impl ParameterSetBuilder {
    setters! {
        radius: f64,
        blade_length: f64,
        cutting_width: f64,
        plate_inertia: f64,
        blade_mass: f64,
        n_blades: u32,
        input_torque: f64,
        viscous_coeff: f64,
        drag_coeff: f64,
        vegetation_density: f64,
        grass_resistance: f64,
        advance_speed: f64,
    }

    pub fn resistive_torque(mut self, strategy: impl ResistiveTorqueStrategy + 'static) -> Self {
        self.resistive_torque = Some(Arc::new(strategy));
        self
    }

    /// Assemble and validate against `limits`.
    pub fn build(self, limits: &ParameterLimits) -> ModelResult<ParameterSet> {
        fn req(value: Option<f64>, field: &'static str) -> ModelResult<f64> {
            value.ok_or(ModelError::Missing { field })
        }
        let params = ParameterSet {
            radius: req(self.radius, "radius")?,
            blade_length: req(self.blade_length, "blade_length")?,
            cutting_width: req(self.cutting_width, "cutting_width")?,
            plate_inertia: req(self.plate_inertia, "plate_inertia")?,
            blade_mass: req(self.blade_mass, "blade_mass")?,
            n_blades: self.n_blades.unwrap_or(2),
            input_torque: req(self.input_torque, "input_torque")?,
            viscous_coeff: req(self.viscous_coeff, "viscous_coeff")?,
            drag_coeff: req(self.drag_coeff, "drag_coeff")?,
            vegetation_density: req(self.vegetation_density, "vegetation_density")?,
            grass_resistance: req(self.grass_resistance, "grass_resistance")?,
            advance_speed: req(self.advance_speed, "advance_speed")?,
            resistive_torque: self.resistive_torque,
        };
        params.validate(limits)?;
        Ok(params)
    }
}
