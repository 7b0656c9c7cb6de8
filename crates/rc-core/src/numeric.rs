use crate::{CoreError, CoreResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Sign with `sign(0) = 0`.
///
/// `f64::signum` maps `+0.0` to `1.0`, which would make a quadratic drag term
/// push a body at rest.
#[inline]
pub fn sign(v: Real) -> Real {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `n` evenly spaced points over `[start, end]`, endpoints included exactly.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as Real;
            let mut out: Vec<Real> = (0..n).map(|i| start + step * i as Real).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Trapezoidal integral of `y` sampled at `x`.
pub fn trapezoid(y: &[Real], x: &[Real]) -> CoreResult<Real> {
    if y.len() != x.len() {
        return Err(CoreError::LengthMismatch {
            what: "trapezoid samples",
            left: y.len(),
            right: x.len(),
        });
    }
    Ok(x.windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum())
}

// Sampled-signal statistics. Empty input yields 0.0 so callers can apply
// their own floors without special-casing.

pub fn mean(x: &[Real]) -> Real {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().sum::<Real>() / x.len() as Real
}

pub fn mean_abs(x: &[Real]) -> Real {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().map(|v| v.abs()).sum::<Real>() / x.len() as Real
}

/// Population standard deviation.
pub fn std_dev(x: &[Real]) -> Real {
    if x.is_empty() {
        return 0.0;
    }
    let m = mean(x);
    let var = x.iter().map(|v| (v - m) * (v - m)).sum::<Real>() / x.len() as Real;
    var.sqrt()
}

pub fn rms(x: &[Real]) -> Real {
    if x.is_empty() {
        return 0.0;
    }
    (x.iter().map(|v| v * v).sum::<Real>() / x.len() as Real).sqrt()
}

pub fn max(x: &[Real]) -> Real {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().copied().fold(Real::NEG_INFINITY, Real::max)
}

pub fn min(x: &[Real]) -> Real {
    if x.is_empty() {
        return 0.0;
    }
    x.iter().copied().fold(Real::INFINITY, Real::min)
}

pub fn peak_to_peak(x: &[Real]) -> Real {
    max(x) - min(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-1e-300), -1.0);
    }

    #[test]
    fn linspace_hits_endpoints() {
        let t = linspace(0.0, 10.0, 1000);
        assert_eq!(t.len(), 1000);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[999], 10.0);
        assert!(t.windows(2).all(|w| w[1] > w[0]));
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn trapezoid_exact_for_linear() {
        let x = linspace(0.0, 2.0, 11);
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
        // ∫ (3x + 1) dx over [0, 2] = 6 + 2
        let area = trapezoid(&y, &x).unwrap();
        assert!((area - 8.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_rejects_mismatched_lengths() {
        assert!(trapezoid(&[1.0, 2.0], &[0.0]).is_err());
    }

    #[test]
    fn statistics_match_hand_values() {
        let x = [1.0, -1.0, 1.0, -1.0];
        assert_eq!(mean(&x), 0.0);
        assert_eq!(mean_abs(&x), 1.0);
        assert_eq!(std_dev(&x), 1.0);
        assert_eq!(rms(&x), 1.0);
        assert_eq!(peak_to_peak(&x), 2.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(peak_to_peak(&[]), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sign_is_odd(v in -1e6_f64..1e6_f64) {
            prop_assert_eq!(sign(v), -sign(-v));
        }

        #[test]
        fn std_dev_never_exceeds_rms(xs in prop::collection::vec(-1e3_f64..1e3_f64, 1..64)) {
            prop_assert!(std_dev(&xs) <= rms(&xs) + 1e-9);
        }
    }
}
