//! Run orchestration: validation, integration, derived series.

use rc_core::Timer;
use rc_model::initial::validate_state;
use rc_model::{CutterState, EquationOfMotion, ParameterLimits, ParameterSet, mechanical_power};
use tracing::{info, warn};

use crate::error::{SimResult, SolveFailure};
use crate::options::SimOptions;
use crate::solver::solve;
use crate::trajectory::Trajectory;

/// Integrate `params` from `initial` over `[0, t_end]` with default solver
/// options and limits.
///
/// Fails only for invalid inputs. A run the solver cannot finish comes back
/// as `Ok` with `success == false`.
pub fn simulate(
    params: &ParameterSet,
    t_end: f64,
    initial: CutterState,
    sample_count: usize,
) -> SimResult<Trajectory> {
    let opts = SimOptions {
        t_end,
        sample_count,
        ..SimOptions::default()
    };
    simulate_with(params, initial, &opts, &ParameterLimits::default())
}

/// [`simulate`] with every option and bound explicit.
pub fn simulate_with(
    params: &ParameterSet,
    initial: CutterState,
    opts: &SimOptions,
    limits: &ParameterLimits,
) -> SimResult<Trajectory> {
    opts.validate_with(limits)?;
    params.validate(limits)?;
    validate_state(initial, limits)?;
    let mut eom = EquationOfMotion::new(params)?;

    let timer = Timer::start("simulate");
    let outcome = solve(&mut eom, initial.to_array(), opts);
    let wall_time_s = timer.stop();

    let solution = match outcome {
        Ok(solution) => solution,
        Err(SolveFailure { error, stats }) if error.is_integration_failure() => {
            warn!(
                %error,
                evaluations = stats.evaluations,
                vegetation = params.vegetation_label(),
                "integration failed"
            );
            return Ok(Trajectory {
                time: Vec::new(),
                theta: Vec::new(),
                omega: Vec::new(),
                torque: Vec::new(),
                power: Vec::new(),
                kinetic_energy: Vec::new(),
                success: false,
                message: error.to_string(),
                n_evaluations: stats.evaluations,
                stats,
                wall_time_s,
                parameters: params.clone(),
                initial_state: initial,
                options: opts.clone(),
            });
        }
        Err(failure) => return Err(failure.error),
    };

    let n = solution.t.len();
    let mut theta = Vec::with_capacity(n);
    let mut omega = Vec::with_capacity(n);
    let mut torque = Vec::with_capacity(n);
    let mut power = Vec::with_capacity(n);
    let mut energy = Vec::with_capacity(n);
    let model = eom.torque();
    for (&t, y) in solution.t.iter().zip(&solution.y) {
        let net = model.net(t, y[1]);
        theta.push(y[0]);
        omega.push(y[1]);
        torque.push(net);
        power.push(mechanical_power(net, y[1]));
        energy.push(eom.kinetic_energy(y[1]));
    }

    info!(
        samples = n,
        evaluations = solution.stats.evaluations,
        rejected = solution.stats.rejected_steps,
        wall_time_s,
        "simulation complete"
    );

    Ok(Trajectory {
        time: solution.t,
        theta,
        omega,
        torque,
        power,
        kinetic_energy: energy,
        success: true,
        message: "integration successful".to_string(),
        n_evaluations: solution.stats.evaluations,
        stats: solution.stats,
        wall_time_s,
        parameters: params.clone(),
        initial_state: initial,
        options: opts.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use rc_model::{FnTorque, ModelError};

    #[test]
    fn short_run_has_requested_samples() {
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0);
        let traj = simulate(&p, 1.0, CutterState::default(), 50).unwrap();
        assert!(traj.success);
        assert_eq!(traj.len(), 50);
        assert_eq!(traj.time[0], 0.0);
        assert_eq!(traj.final_time(), Some(1.0));
        assert!(traj.time.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(traj.n_evaluations, traj.stats.evaluations);
    }

    #[test]
    fn derived_series_are_consistent() {
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0);
        let traj = simulate(&p, 2.0, CutterState::default(), 20).unwrap();
        let inertia = p.total_inertia();
        for i in 0..traj.len() {
            assert!((traj.power[i] - traj.torque[i] * traj.omega[i]).abs() < 1e-9);
            let ke = 0.5 * inertia * traj.omega[i] * traj.omega[i];
            assert!((traj.kinetic_energy[i] - ke).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_parameters_are_errors_not_failed_runs() {
        let mut p = ParameterSet::from_basic(15.0, 0.6, 200.0);
        p.radius = -1.0;
        let err = simulate(&p, 1.0, CutterState::default(), 50).unwrap_err();
        assert!(matches!(err, SimError::Model(ModelError::OutOfRange { field: "radius", .. })));
    }

    #[test]
    fn precondition_violations_are_errors() {
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0);
        assert!(simulate(&p, 0.0, CutterState::default(), 50).is_err());
        assert!(simulate(&p, 1.0, CutterState::default(), 5).is_err());
        assert!(simulate(&p, 1.0, CutterState::new(0.0, 5000.0), 50).is_err());
    }

    #[test]
    fn statistics_of_successful_run() {
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0);
        let traj = simulate(&p, 2.0, CutterState::default(), 200).unwrap();
        let stats = traj.statistics();
        assert!((stats.duration - 2.0).abs() < 1e-12);
        assert!(stats.omega_abs_max > 0.0);
        // Net work equals the kinetic energy gained, up to quadrature error.
        let gained = traj.kinetic_energy[traj.len() - 1] - traj.kinetic_energy[0];
        assert!((stats.net_work - gained).abs() < 1e-2 * gained.max(1.0));
    }

    #[test]
    fn failed_run_keeps_its_work_counts() {
        // NaN load strictly between the times checked during validation.
        let load = FnTorque::new("nan window", |t| {
            if t > 2.0 && t < 3.0 { f64::NAN } else { 50.0 }
        });
        let p = ParameterSet::from_basic(15.0, 0.6, 200.0).with_resistive_torque(load);
        let traj = simulate(&p, 10.0, CutterState::default(), 100).unwrap();
        assert!(!traj.success);
        assert!(traj.is_empty());
        assert!(traj.message.contains("Non-finite"), "{}", traj.message);
        assert!(traj.n_evaluations > 0);
        assert_eq!(traj.n_evaluations, traj.stats.evaluations);
        assert!(traj.stats.accepted_steps > 0);
    }
}
