//! Independent runs in parallel.

use rayon::prelude::*;
use rc_model::{CutterState, ParameterLimits, ParameterSet};
use tracing::info;

use crate::error::SimResult;
use crate::options::SimOptions;
use crate::run::simulate_with;
use crate::trajectory::Trajectory;

/// One named configuration to run.
#[derive(Clone, Debug)]
pub struct BatchCase {
    pub name: String,
    pub params: ParameterSet,
    pub initial: CutterState,
    pub options: SimOptions,
    pub limits: ParameterLimits,
}

/// Result of one case; an invalid case does not stop the others.
#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub result: SimResult<Trajectory>,
}

impl BatchOutcome {
    /// The trajectory, when the case was valid and integration succeeded.
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.result.as_ref().ok().filter(|t| t.success)
    }
}

/// Run every case on the rayon pool. Output order matches `cases`.
pub fn simulate_batch(cases: &[BatchCase]) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = cases
        .par_iter()
        .map(|case| BatchOutcome {
            name: case.name.clone(),
            result: simulate_with(&case.params, case.initial, &case.options, &case.limits),
        })
        .collect();
    let succeeded = outcomes.iter().filter(|o| o.trajectory().is_some()).count();
    info!(cases = cases.len(), succeeded, "batch complete");
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, mass: f64) -> BatchCase {
        BatchCase {
            name: name.to_string(),
            params: ParameterSet::from_basic(mass, 0.6, 200.0),
            initial: CutterState::default(),
            options: SimOptions {
                t_end: 1.0,
                sample_count: 20,
                ..SimOptions::default()
            },
            limits: ParameterLimits::default(),
        }
    }

    #[test]
    fn batch_matches_sequential_runs_in_order() {
        let cases = vec![case("light", 10.0), case("heavy", 30.0), case("mid", 15.0)];
        let outcomes = simulate_batch(&cases);
        assert_eq!(outcomes.len(), 3);
        for (c, o) in cases.iter().zip(&outcomes) {
            assert_eq!(c.name, o.name);
            let solo = simulate_with(&c.params, c.initial, &c.options, &c.limits).unwrap();
            assert_eq!(o.trajectory().unwrap().omega, solo.omega);
        }
    }

    #[test]
    fn invalid_case_does_not_stop_batch() {
        let mut bad = case("bad", 15.0);
        bad.params.n_blades = 0;
        let outcomes = simulate_batch(&[bad, case("good", 15.0)]);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].trajectory().is_some());
    }
}
