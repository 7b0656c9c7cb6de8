//! TransientModel trait for the systems the solver integrates.

use rc_model::{CutterState, EquationOfMotion};

use crate::error::SimResult;

/// First-order system `dy/dt = f(t, y)` over an `N`-component state.
///
/// Takes `&mut self` so models may cache between evaluations; the solver
/// calls `rhs` at trial times that are not monotone.
pub trait TransientModel<const N: usize> {
    fn rhs(&mut self, t: f64, y: &[f64; N]) -> SimResult<[f64; N]>;
}

/// State layout `[θ, ω]`.
impl TransientModel<2> for EquationOfMotion<'_> {
    fn rhs(&mut self, t: f64, y: &[f64; 2]) -> SimResult<[f64; 2]> {
        Ok(self.derivative(t, CutterState::from_array(*y)).to_array())
    }
}
