// rc-core/src/units.rs

use uom::si::angle::{degree, radian};
use uom::si::angular_velocity::{radian_per_second, revolution_per_minute};
use uom::si::f64::{Angle as UomAngle, AngularVelocity as UomAngularVelocity};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type AngularVelocity = UomAngularVelocity;

#[inline]
pub fn deg(v: f64) -> Angle {
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn rpm(v: f64) -> AngularVelocity {
    AngularVelocity::new::<revolution_per_minute>(v)
}

/// Shaft speed in rpm to rad/s.
#[inline]
pub fn rpm_to_rad_per_s(v: f64) -> f64 {
    rpm(v).get::<radian_per_second>()
}

/// Shaft speed in rad/s to rpm.
#[inline]
pub fn rad_per_s_to_rpm(v: f64) -> f64 {
    rad_per_s(v).get::<revolution_per_minute>()
}

#[inline]
pub fn deg_to_rad(v: f64) -> f64 {
    deg(v).get::<radian>()
}
