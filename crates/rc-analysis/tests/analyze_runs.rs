//! Metrics computed from real simulation runs.

use proptest::prelude::*;
use rc_analysis::{MetricKey, PerformanceMetrics, analyze, compare};
use rc_model::{CutterState, ParameterLimits, ParameterSet, SinusoidalTorque};
use rc_sim::{SimOptions, simulate, simulate_with};

fn reference_cutter() -> ParameterSet {
    ParameterSet::from_basic(15.0, 0.6, 200.0)
}

#[test]
fn energy_balance_of_spin_up() {
    let p = reference_cutter();
    let traj = simulate(&p, 10.0, CutterState::default(), 1000).unwrap();
    let m = analyze(&traj);

    assert!(m.energy_total > 0.0);
    let rel = (m.energy_total - m.energy_useful - m.energy_losses).abs() / m.energy_total;
    assert!(rel < 1e-6);

    // ∫ τ_in·ω dt = τ_in·Δθ
    let swept = traj.theta[999] - traj.theta[0];
    assert!((m.energy_total - 200.0 * swept).abs() < 1e-3 * m.energy_total);

    // Constant resistance: useful share is τ_grass / τ_input.
    assert!((m.efficiency - 6.0 / 200.0).abs() < 1e-9);
    assert!((m.area_cut - 2.0 * 1.8 * 10.0).abs() < 1e-9);
    assert!((m.cutting_rate - 3.6).abs() < 1e-12);
    assert!((m.area_efficiency - m.area_cut / m.energy_total).abs() < 1e-15);
}

#[test]
fn instantaneous_efficiency_and_bands() {
    let traj = simulate(&reference_cutter(), 5.0, CutterState::default(), 500).unwrap();
    let m = analyze(&traj);

    assert_eq!(m.efficiency_series.len(), 500);
    // At rest no power goes in, so the first sample reads 0%.
    assert_eq!(m.efficiency_series[0], 0.0);
    assert!(m.efficiency_series[1..].iter().all(|e| (e - 3.0).abs() < 1e-9));
    assert!((m.efficiency_peak - 3.0).abs() < 1e-9);
    assert_eq!(m.efficiency_min, 0.0);
    assert_eq!(m.time_low_efficiency_pct, 100.0);
    assert_eq!(m.time_high_efficiency_pct + m.time_medium_efficiency_pct, 0.0);
}

#[test]
fn negative_rotation_has_zero_efficiency() {
    let mut p = reference_cutter();
    p.grass_resistance = 50.0;
    p.vegetation_density = 5.0;
    p.advance_speed = 10.0;
    let traj = simulate(&p, 10.0, CutterState::default(), 1000).unwrap();
    let m = analyze(&traj);
    assert!(m.energy_total < 0.0);
    assert_eq!(m.efficiency, 0.0);
    assert_eq!(m.area_efficiency, 0.0);
    assert_eq!(m.efficiency_average, 0.0);
}

#[test]
fn failed_run_yields_zero_metrics() {
    let opts = SimOptions {
        max_evaluations: 10,
        ..SimOptions::default()
    };
    let traj = simulate_with(
        &reference_cutter(),
        CutterState::default(),
        &opts,
        &ParameterLimits::default(),
    )
    .unwrap();
    assert!(!traj.success);
    assert_eq!(analyze(&traj), PerformanceMetrics::default());
}

#[test]
fn periodic_resistance_sets_dominant_frequency() {
    let p = reference_cutter().with_resistive_torque(SinusoidalTorque {
        offset: 60.0,
        amplitude: 50.0,
        frequency_hz: 2.0,
        phase: 0.0,
    });
    // Start at the equilibrium of the mean load so the spin-up transient
    // does not swamp the spectrum.
    let omega0 = (-0.1 + (0.01_f64 + 4.0 * 0.01 * 140.0).sqrt()) / 0.02;
    let traj = simulate(&p, 10.0, CutterState::new(0.0, omega0), 1000).unwrap();
    let m = analyze(&traj);
    assert!((m.dominant_frequency - 2.0).abs() < 0.15, "{}", m.dominant_frequency);
    assert!(m.spectrum.sampling_frequency > 99.0);
    assert!(m.torque_stability < 1.0);
}

#[test]
fn settling_after_spin_up() {
    let traj = simulate(&reference_cutter(), 10.0, CutterState::default(), 1000).unwrap();
    let m = analyze(&traj);
    // Time constant is about 1.8 s, so the 5% band is reached in a few seconds.
    assert!(m.settling_time > 1.0 && m.settling_time < 8.0, "{}", m.settling_time);
    assert!(m.overshoot.abs() < 1e-6);
    assert!(m.omega_stability > 0.0 && m.omega_stability < 1.0);
}

#[test]
fn heavier_cutter_ranks_lower_on_stability() {
    let runs: Vec<(String, PerformanceMetrics)> = [("light", 10.0), ("heavy", 40.0)]
        .into_iter()
        .map(|(name, mass)| {
            let p = ParameterSet::from_basic(mass, 0.6, 200.0);
            let traj = simulate(&p, 5.0, CutterState::default(), 200).unwrap();
            (name.to_string(), analyze(&traj))
        })
        .collect();
    let report = compare(&runs, &[MetricKey::OmegaStability]).unwrap();
    let ranking = report.ranking(MetricKey::OmegaStability).unwrap();
    assert_eq!(ranking.best().unwrap().name, "light");
}

#[test]
fn metrics_serialize_without_series() {
    let traj = simulate(&reference_cutter(), 1.0, CutterState::default(), 20).unwrap();
    let json = serde_json::to_string(&analyze(&traj).without_series()).unwrap();
    assert!(json.contains("\"energy_total\""));
    assert!(!json.contains("efficiency_series"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn metric_bounds_hold(
        mass in 5.0_f64..40.0,
        radius in 0.2_f64..1.0,
        torque in 20.0_f64..400.0,
        k_grass in 0.0_f64..60.0,
        omega0 in -100.0_f64..100.0,
    ) {
        let mut p = ParameterSet::from_basic(mass, radius, torque);
        p.grass_resistance = k_grass;
        let traj = simulate(&p, 2.0, CutterState::new(0.0, omega0), 50).unwrap();
        prop_assert!(traj.success);
        let m = analyze(&traj);
        prop_assert!((0.0..=100.0).contains(&m.efficiency_average));
        prop_assert!(m.efficiency_series.iter().all(|e| (0.0..=100.0).contains(e)));
        for s in [m.omega_stability, m.torque_stability, m.power_stability] {
            prop_assert!((0.0..=1.0).contains(&s));
        }
        let scale = m.energy_total.abs().max(1.0);
        prop_assert!((m.energy_total - m.energy_useful - m.energy_losses).abs() <= 1e-6 * scale);
        let bands = m.time_high_efficiency_pct + m.time_medium_efficiency_pct + m.time_low_efficiency_pct;
        prop_assert!((bands - 100.0).abs() < 1e-9);
    }
}
