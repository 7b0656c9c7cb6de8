//! Vegetation that varies along the cutting path.
//!
//! The cutter advances at constant speed, so a density field `ρ(x)` becomes a
//! time-dependent torque through `x(t) = v·t`:
//! `τ_grass(t) = k_grass·ρ(v·t)·R`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::strategy::ResistiveTorqueStrategy;

/// Floor applied by the smooth terrain profiles so a cut never meets bare soil.
const MIN_TERRAIN_DENSITY: f64 = 0.1;

/// Vegetation density along the path, kg/m².
pub trait VegetationDensity {
    fn density_at(&self, x: f64) -> f64;
}

/// Which density the first zone carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZonePattern {
    #[default]
    #[serde(alias = "alternating")]
    LowFirst,
    HighFirst,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianPatch {
    pub center: f64,
    pub amplitude: f64,
    /// Standard deviation, m.
    pub width: f64,
}

impl GaussianPatch {
    fn at(&self, x: f64) -> f64 {
        if self.width <= 0.0 {
            return 0.0;
        }
        let z = (x - self.center) / self.width;
        self.amplitude * (-0.5 * z * z).exp()
    }
}

/// Rectangular extra density on `[x_start, x_end]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityZone {
    pub x_start: f64,
    pub x_end: f64,
    pub density_add: f64,
}

/// Linear increase `slope·(x − x_start)` on `[x_start, x_end]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityTrend {
    pub x_start: f64,
    pub x_end: f64,
    pub slope: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeTerrain {
    pub base_density: f64,
    pub patches: Vec<GaussianPatch>,
    pub zones: Vec<DensityZone>,
    pub trends: Vec<DensityTrend>,
}

impl VegetationDensity for CompositeTerrain {
    fn density_at(&self, x: f64) -> f64 {
        let patches: f64 = self.patches.iter().map(|p| p.at(x)).sum();
        let zones: f64 = self
            .zones
            .iter()
            .filter(|z| z.x_start <= x && x <= z.x_end)
            .map(|z| z.density_add)
            .sum();
        let trends: f64 = self
            .trends
            .iter()
            .filter(|tr| tr.x_start <= x && x <= tr.x_end)
            .map(|tr| tr.slope * (x - tr.x_start))
            .sum();
        (self.base_density + patches + zones + trends).max(MIN_TERRAIN_DENSITY)
    }
}

/// Serializable density field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DensityProfile {
    Uniform {
        density: f64,
    },
    /// Alternating bands of low and high density.
    Zones {
        zone_length: f64,
        rho_low: f64,
        rho_high: f64,
        #[serde(default)]
        pattern: ZonePattern,
    },
    GaussianPatches {
        base: f64,
        patches: Vec<GaussianPatch>,
    },
    /// Smooth change from `rho_initial` to `rho_final` centred on
    /// `x_transition`; `transition_width` spans roughly 12%–88% of the rise.
    Sigmoid {
        x_transition: f64,
        rho_initial: f64,
        rho_final: f64,
        transition_width: f64,
    },
    Sinusoidal {
        rho_base: f64,
        amplitude: f64,
        wavelength: f64,
        #[serde(default)]
        phase: f64,
    },
    Composite(CompositeTerrain),
}

impl VegetationDensity for DensityProfile {
    fn density_at(&self, x: f64) -> f64 {
        match self {
            Self::Uniform { density } => *density,
            Self::Zones {
                zone_length,
                rho_low,
                rho_high,
                pattern,
            } => {
                if *zone_length <= 0.0 {
                    return *rho_low;
                }
                let even = (x / zone_length).floor().rem_euclid(2.0) == 0.0;
                match (pattern, even) {
                    (ZonePattern::LowFirst, true) | (ZonePattern::HighFirst, false) => *rho_low,
                    _ => *rho_high,
                }
            }
            Self::GaussianPatches { base, patches } => {
                (base + patches.iter().map(|p| p.at(x)).sum::<f64>()).max(0.0)
            }
            Self::Sigmoid {
                x_transition,
                rho_initial,
                rho_final,
                transition_width,
            } => {
                if *transition_width <= 0.0 {
                    return if x < *x_transition { *rho_initial } else { *rho_final };
                }
                let k = 4.0 / transition_width;
                let s = 1.0 / (1.0 + (-k * (x - x_transition)).exp());
                rho_initial + (rho_final - rho_initial) * s
            }
            Self::Sinusoidal {
                rho_base,
                amplitude,
                wavelength,
                phase,
            } => {
                if *wavelength <= 0.0 {
                    return rho_base.max(MIN_TERRAIN_DENSITY);
                }
                let k = 2.0 * PI / wavelength;
                (rho_base + amplitude * (k * x + phase).sin()).max(MIN_TERRAIN_DENSITY)
            }
            Self::Composite(terrain) => terrain.density_at(x),
        }
    }
}

impl DensityProfile {
    fn label(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "spatial:uniform",
            Self::Zones { .. } => "spatial:zones",
            Self::GaussianPatches { .. } => "spatial:gaussian_patches",
            Self::Sigmoid { .. } => "spatial:sigmoid",
            Self::Sinusoidal { .. } => "spatial:sinusoidal",
            Self::Composite(_) => "spatial:composite",
        }
    }
}

/// Density field bound to the cutter's advance speed and geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialTorque {
    pub density: DensityProfile,
    pub k_grass: f64,
    pub radius: f64,
    pub advance_speed: f64,
}

impl SpatialTorque {
    /// Path position at time `t`.
    pub fn position(&self, t: f64) -> f64 {
        self.advance_speed * t
    }
}

impl ResistiveTorqueStrategy for SpatialTorque {
    fn evaluate(&self, t: f64) -> f64 {
        self.k_grass * self.density.density_at(self.position(t)) * self.radius
    }

    fn label(&self) -> &str {
        self.density.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(pattern: ZonePattern) -> DensityProfile {
        DensityProfile::Zones {
            zone_length: 10.0,
            rho_low: 0.5,
            rho_high: 2.0,
            pattern,
        }
    }

    #[test]
    fn zones_alternate() {
        let z = zones(ZonePattern::LowFirst);
        assert_eq!(z.density_at(0.0), 0.5);
        assert_eq!(z.density_at(9.99), 0.5);
        assert_eq!(z.density_at(10.0), 2.0);
        assert_eq!(z.density_at(25.0), 0.5);
        let h = zones(ZonePattern::HighFirst);
        assert_eq!(h.density_at(0.0), 2.0);
        assert_eq!(h.density_at(15.0), 0.5);
    }

    #[test]
    fn alternating_is_an_alias_for_low_first() {
        let p: ZonePattern = serde_yaml::from_str("alternating").unwrap();
        assert_eq!(p, ZonePattern::LowFirst);
    }

    #[test]
    fn gaussian_peak_at_center() {
        let g = DensityProfile::GaussianPatches {
            base: 0.5,
            patches: vec![GaussianPatch {
                center: 8.0,
                amplitude: 1.5,
                width: 2.0,
            }],
        };
        assert!((g.density_at(8.0) - 2.0).abs() < 1e-12);
        assert!(g.density_at(100.0) - 0.5 < 1e-12);
    }

    #[test]
    fn gaussian_never_negative() {
        let g = DensityProfile::GaussianPatches {
            base: 0.1,
            patches: vec![GaussianPatch {
                center: 0.0,
                amplitude: -5.0,
                width: 1.0,
            }],
        };
        assert_eq!(g.density_at(0.0), 0.0);
    }

    #[test]
    fn sigmoid_midpoint_and_limits() {
        let s = DensityProfile::Sigmoid {
            x_transition: 15.0,
            rho_initial: 0.5,
            rho_final: 2.5,
            transition_width: 3.0,
        };
        assert!((s.density_at(15.0) - 1.5).abs() < 1e-12);
        assert!((s.density_at(-100.0) - 0.5).abs() < 1e-9);
        assert!((s.density_at(100.0) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn sinusoid_has_floor() {
        let s = DensityProfile::Sinusoidal {
            rho_base: 0.5,
            amplitude: 1.0,
            wavelength: 20.0,
            phase: 0.0,
        };
        // trough at x = 15: 0.5 − 1.0 clamps to the floor
        assert_eq!(s.density_at(15.0), MIN_TERRAIN_DENSITY);
        assert!((s.density_at(5.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn composite_sums_features_in_range() {
        let terrain = CompositeTerrain {
            base_density: 1.0,
            patches: vec![],
            zones: vec![DensityZone {
                x_start: 5.0,
                x_end: 10.0,
                density_add: 0.5,
            }],
            trends: vec![DensityTrend {
                x_start: 8.0,
                x_end: 12.0,
                slope: 0.25,
            }],
        };
        assert_eq!(terrain.density_at(0.0), 1.0);
        assert_eq!(terrain.density_at(6.0), 1.5);
        assert!((terrain.density_at(10.0) - (1.0 + 0.5 + 0.5)).abs() < 1e-12);
        assert!((terrain.density_at(12.0) - 2.0).abs() < 1e-12);
        assert_eq!(terrain.density_at(13.0), 1.0);
    }

    #[test]
    fn spatial_torque_maps_time_to_position() {
        let s = SpatialTorque {
            density: zones(ZonePattern::LowFirst),
            k_grass: 15.0,
            radius: 0.6,
            advance_speed: 3.0,
        };
        // t = 4 s → x = 12 m, second zone
        assert!((s.evaluate(4.0) - 15.0 * 2.0 * 0.6).abs() < 1e-12);
        assert_eq!(s.label(), "spatial:zones");
    }
}
