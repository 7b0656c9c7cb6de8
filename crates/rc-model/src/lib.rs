//! Physical model of a rotary cutter: a plate carrying blades, driven by a
//! motor torque and opposed by viscous friction, aerodynamic drag and
//! vegetation-cutting resistance.
//!
//! # Architecture
//!
//! - [`ParameterSet`] holds every physical constant for one run and is
//!   validated against an injectable [`ParameterLimits`].
//! - [`ResistiveTorqueStrategy`] is the seam for vegetation resistance that
//!   varies in time or along the cutting path ([`TorqueProfile`],
//!   [`DensityProfile`]).
//! - [`TorqueModel`] splits the torque acting on the shaft into its four terms.
//! - [`EquationOfMotion`] turns torque and inertia into `dθ/dt`, `dω/dt`.
//! - [`InitialCondition`] and [`CutterConfig`] are the serde-facing
//!   configuration records.

pub mod config;
pub mod error;
pub mod initial;
pub mod limits;
pub mod motion;
pub mod params;
pub mod spatial;
pub mod strategy;
pub mod temporal;
pub mod torque;

pub use config::CutterConfig;
pub use error::{ModelError, ModelResult};
pub use initial::InitialCondition;
pub use limits::ParameterLimits;
pub use motion::{
    CutterState, EquationOfMotion, InertiaBreakdown, kinetic_energy, mechanical_power,
    solid_disk_inertia,
};
pub use params::{ParameterSet, ParameterSetBuilder};
pub use spatial::{
    CompositeTerrain, DensityProfile, DensityTrend, DensityZone, GaussianPatch, SpatialTorque,
    VegetationDensity, ZonePattern,
};
pub use strategy::{FnTorque, ResistiveTorqueStrategy, SharedStrategy, TorqueProfile};
pub use temporal::{ConstantTorque, ExponentialTorque, RampTorque, SinusoidalTorque, StepTorque};
pub use torque::{TorqueBreakdown, TorqueModel};
