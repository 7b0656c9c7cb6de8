//! Energy, efficiency, power, stability and dynamic metrics of one run.
//!
//! Every metric is a pure function of the trajectory and the parameter set
//! it carries. Degenerate inputs produce floors (0 or 1), never NaN.

use rc_core::{max, mean, mean_abs, min, peak_to_peak, rms, std_dev, trapezoid};
use rc_model::TorqueModel;
use rc_sim::Trajectory;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::spectrum::Spectrum;

/// Input power below this (W) counts as idle for instantaneous efficiency.
const MIN_INPUT_POWER: f64 = 1e-6;
/// Regularizes the coefficient of variation for signals near zero.
const STABILITY_EPS: f64 = 1e-10;
/// Band around the final speed used for settling time.
const SETTLING_BAND: f64 = 0.05;

/// Mean, spread and size of one sampled signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalStatistics {
    pub mean: f64,
    pub std: f64,
    pub range: f64,
    pub rms: f64,
}

impl SignalStatistics {
    pub fn of(x: &[f64]) -> Self {
        Self {
            mean: mean(x),
            std: std_dev(x),
            range: peak_to_peak(x),
            rms: rms(x),
        }
    }
}

/// Read-only snapshot of a run's performance. All zero for a failed run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// `∫ τ_input·ω dt`, J
    pub energy_total: f64,
    /// `∫ τ_grass(t)·ω dt`, J
    pub energy_useful: f64,
    /// `energy_total − energy_useful`, J
    pub energy_losses: f64,
    /// `energy_useful / energy_total`; 0 when no energy went in
    pub efficiency: f64,
    /// Mean instantaneous efficiency, %
    pub efficiency_average: f64,
    pub efficiency_peak: f64,
    pub efficiency_min: f64,
    /// Share of samples with instantaneous efficiency above 80%, %
    pub time_high_efficiency_pct: f64,
    /// Share of samples in [60%, 80%], %
    pub time_medium_efficiency_pct: f64,
    /// Share of samples below 60%, %
    pub time_low_efficiency_pct: f64,

    /// Net shaft power `τ_net·ω` statistics, W
    pub power_avg: f64,
    pub power_max: f64,
    pub power_min: f64,
    pub power_rms: f64,
    pub power_input_avg: f64,
    pub power_useful_avg: f64,
    pub power_input_peak: f64,
    pub power_useful_peak: f64,

    /// `1 − std/mean|x|`, clamped to [0, 1]
    pub omega_stability: f64,
    pub torque_stability: f64,
    pub power_stability: f64,

    /// `v·w·t_final`, m²
    pub area_cut: f64,
    /// `v·w`, m²/s
    pub cutting_rate: f64,
    /// `area_cut / energy_total`, m²/J; 0 when no energy went in
    pub area_efficiency: f64,

    /// Time of the last sample outside a 5% band around the final speed, s
    pub settling_time: f64,
    /// `(max ω − ω_final)/|ω_final|`, %
    pub overshoot: f64,

    /// Largest non-DC component of the net torque, Hz
    pub dominant_frequency: f64,
    pub spectrum: Spectrum,

    pub omega_stats: SignalStatistics,
    pub torque_stats: SignalStatistics,
    pub power_stats: SignalStatistics,

    /// Instantaneous efficiency per sample, %
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub efficiency_series: Vec<f64>,
    /// `τ_input·ω` per sample, W
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub power_input_series: Vec<f64>,
    /// `τ_grass·ω` per sample, W
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub power_useful_series: Vec<f64>,
}

impl PerformanceMetrics {
    /// Drop the per-sample series, keeping the scalar summary.
    pub fn without_series(mut self) -> Self {
        self.efficiency_series = Vec::new();
        self.power_input_series = Vec::new();
        self.power_useful_series = Vec::new();
        self
    }
}

/// `1 − std(x) / (mean(|x|) + ε)`, clamped to [0, 1].
pub fn stability_index(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    (1.0 - std_dev(x) / (mean_abs(x) + STABILITY_EPS)).clamp(0.0, 1.0)
}

fn instantaneous_efficiency(p_input: f64, p_useful: f64) -> f64 {
    let valid = p_input > MIN_INPUT_POWER
        && p_useful >= 0.0
        && p_input.is_finite()
        && p_useful.is_finite();
    if valid {
        (100.0 * p_useful / p_input).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn settling_time(time: &[f64], omega: &[f64]) -> f64 {
    let Some(&last) = omega.last() else {
        return 0.0;
    };
    let band = SETTLING_BAND * last.abs();
    omega
        .iter()
        .rposition(|w| (w - last).abs() > band)
        .map(|i| time[i])
        .unwrap_or(time[0])
}

fn overshoot(omega: &[f64]) -> f64 {
    match omega.last() {
        Some(&last) if last != 0.0 => (max(omega) - last) / last.abs() * 100.0,
        _ => 0.0,
    }
}

fn share_pct(series: &[f64], pred: impl Fn(f64) -> bool) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    100.0 * series.iter().filter(|&&e| pred(e)).count() as f64 / series.len() as f64
}

/// Compute every metric of `traj`.
///
/// A failed or empty trajectory logs a warning and yields all-zero metrics.
pub fn analyze(traj: &Trajectory) -> PerformanceMetrics {
    if !traj.success || traj.is_empty() {
        warn!(message = %traj.message, "analyzing failed simulation; metrics are zero");
        return PerformanceMetrics::default();
    }

    let params = &traj.parameters;
    let torque_model = TorqueModel::new(params);
    let time = &traj.time;
    let omega = &traj.omega;

    let power_input: Vec<f64> = omega.iter().map(|w| params.input_torque * w).collect();
    let power_useful: Vec<f64> = time
        .iter()
        .zip(omega)
        .map(|(&t, w)| torque_model.vegetation(t) * w)
        .collect();

    let energy_total = trapezoid(&power_input, time).unwrap_or(0.0);
    let energy_useful = trapezoid(&power_useful, time).unwrap_or(0.0);
    let energy_losses = energy_total - energy_useful;
    let has_input = energy_total > 0.0;
    let efficiency = if has_input { energy_useful / energy_total } else { 0.0 };

    let efficiency_series: Vec<f64> = power_input
        .iter()
        .zip(&power_useful)
        .map(|(&pi, &pu)| instantaneous_efficiency(pi, pu))
        .collect();

    let t_final = time[time.len() - 1];
    let cutting_rate = params.advance_speed * params.cutting_width;
    let area_cut = cutting_rate * t_final;

    let spectrum = match Spectrum::of(time, &traj.torque) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "torque spectrum unavailable");
            Spectrum::default()
        }
    };

    PerformanceMetrics {
        energy_total,
        energy_useful,
        energy_losses,
        efficiency,
        efficiency_average: mean(&efficiency_series),
        efficiency_peak: max(&efficiency_series),
        efficiency_min: min(&efficiency_series),
        time_high_efficiency_pct: share_pct(&efficiency_series, |e| e > 80.0),
        time_medium_efficiency_pct: share_pct(&efficiency_series, |e| (60.0..=80.0).contains(&e)),
        time_low_efficiency_pct: share_pct(&efficiency_series, |e| e < 60.0),
        power_avg: mean(&traj.power),
        power_max: max(&traj.power),
        power_min: min(&traj.power),
        power_rms: rms(&traj.power),
        power_input_avg: mean(&power_input),
        power_useful_avg: mean(&power_useful),
        power_input_peak: max(&power_input),
        power_useful_peak: max(&power_useful),
        omega_stability: stability_index(omega),
        torque_stability: stability_index(&traj.torque),
        power_stability: stability_index(&traj.power),
        area_cut,
        cutting_rate,
        area_efficiency: if has_input { area_cut / energy_total } else { 0.0 },
        settling_time: settling_time(time, omega),
        overshoot: overshoot(omega),
        dominant_frequency: spectrum.dominant_frequency(),
        spectrum,
        omega_stats: SignalStatistics::of(omega),
        torque_stats: SignalStatistics::of(&traj.torque),
        power_stats: SignalStatistics::of(&traj.power),
        efficiency_series,
        power_input_series: power_input,
        power_useful_series: power_useful,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stability_of_constant_is_one() {
        assert_eq!(stability_index(&[4.0; 10]), 1.0);
        assert_eq!(stability_index(&[0.0; 10]), 1.0);
        assert_eq!(stability_index(&[]), 0.0);
    }

    #[test]
    fn stability_of_zero_mean_signal_is_zero() {
        assert!(stability_index(&[1.0, -1.0, 1.0, -1.0]) < 1e-9);
    }

    #[test]
    fn instantaneous_efficiency_mask() {
        assert_eq!(instantaneous_efficiency(0.0, 5.0), 0.0);
        assert_eq!(instantaneous_efficiency(1e-7, 1e-8), 0.0);
        assert_eq!(instantaneous_efficiency(100.0, -1.0), 0.0);
        assert_eq!(instantaneous_efficiency(f64::INFINITY, 1.0), 0.0);
        assert!((instantaneous_efficiency(200.0, 50.0) - 25.0).abs() < 1e-12);
        assert_eq!(instantaneous_efficiency(10.0, 50.0), 100.0);
    }

    #[test]
    fn settling_and_overshoot() {
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        let w = [0.0, 12.0, 10.8, 10.2, 10.0];
        assert_eq!(settling_time(&t, &w), 2.0);
        assert!((overshoot(&w) - 20.0).abs() < 1e-12);
        let flat = [10.0; 5];
        assert_eq!(settling_time(&t, &flat), 0.0);
        assert_eq!(overshoot(&[1.0, 0.0]), 0.0);
    }

    #[test]
    fn bands_partition_samples() {
        let e = [90.0, 80.0, 70.0, 60.0, 10.0];
        let hi = share_pct(&e, |x| x > 80.0);
        let mid = share_pct(&e, |x| (60.0..=80.0).contains(&x));
        let lo = share_pct(&e, |x| x < 60.0);
        assert_eq!((hi, mid, lo), (20.0, 60.0, 20.0));
    }
}
