//! Frequency content of a uniformly sampled signal.

use std::f64::consts::TAU;

use rc_core::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;

/// Fewer samples than this yield an empty spectrum.
pub const MIN_SAMPLES: usize = 10;

/// One-sided DFT magnitudes for bins `1..n/2`, DC excluded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Hz
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
    /// Hz, from the mean sample spacing
    pub sampling_frequency: f64,
}

impl Spectrum {
    /// Direct DFT of `values` sampled at `time`.
    ///
    /// `O(n²)`; sample counts here stay in the low thousands. The twiddle angle
    /// is reduced modulo `n` before scaling so large `j·k` products keep full
    /// precision.
    pub fn of(time: &[f64], values: &[f64]) -> AnalysisResult<Self> {
        if time.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                what: "spectrum samples",
                left: time.len(),
                right: values.len(),
            }
            .into());
        }
        let n = time.len();
        if n < MIN_SAMPLES {
            return Ok(Self::default());
        }
        let dt = (time[n - 1] - time[0]) / (n - 1) as f64;
        if !(dt > 0.0 && dt.is_finite()) {
            return Ok(Self::default());
        }

        let half = n / 2;
        let mut frequencies = Vec::with_capacity(half.saturating_sub(1));
        let mut magnitudes = Vec::with_capacity(half.saturating_sub(1));
        for k in 1..half {
            let (mut re, mut im) = (0.0, 0.0);
            for (j, &x) in values.iter().enumerate() {
                let angle = TAU * ((j * k) % n) as f64 / n as f64;
                re += x * angle.cos();
                im -= x * angle.sin();
            }
            frequencies.push(k as f64 / (n as f64 * dt));
            magnitudes.push(re.hypot(im));
        }
        Ok(Self {
            frequencies,
            magnitudes,
            sampling_frequency: 1.0 / dt,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency of the largest non-DC bin, or 0 when empty.
    pub fn dominant_frequency(&self) -> f64 {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| self.frequencies[i])
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::linspace;

    #[test]
    fn pure_sinusoid_peaks_at_its_frequency() {
        let dt = 0.01;
        let t: Vec<f64> = (0..1000).map(|i| i as f64 * dt).collect();
        let x: Vec<f64> = t.iter().map(|&ti| 3.0 + (TAU * 2.0 * ti).sin()).collect();
        let s = Spectrum::of(&t, &x).unwrap();
        assert_eq!(s.frequencies.len(), 499);
        assert!((s.sampling_frequency - 100.0).abs() < 1e-9);
        assert!((s.dominant_frequency() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn constant_signal_has_no_energy_off_dc() {
        let t = linspace(0.0, 1.0, 64);
        let x = vec![5.0; 64];
        let s = Spectrum::of(&t, &x).unwrap();
        assert!(s.magnitudes.iter().all(|m| *m < 1e-9));
    }

    #[test]
    fn short_series_is_empty() {
        let t = linspace(0.0, 1.0, 9);
        let s = Spectrum::of(&t, &t).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.dominant_frequency(), 0.0);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        assert!(Spectrum::of(&[0.0; 12], &[0.0; 11]).is_err());
    }
}
