//! Adaptive-step explicit Runge–Kutta solver.
//!
//! One routine drives every [`Tableau`]: each step forms the propagated and
//! embedded solutions, measures their difference in a mixed
//! absolute/relative RMS norm, and accepts the step when the norm is at most
//! one. Output is produced on an even grid from the pair's continuous
//! extension inside each accepted step, so the sample grid never constrains
//! the internal steps.

use std::array::from_fn;

use rc_core::linspace;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SimError, SimResult, SolveFailure};
use crate::model::TransientModel;
use crate::options::SimOptions;
use crate::tableau::Tableau;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// Work done by one solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Right-hand-side evaluations, including the initial-step trial.
    pub evaluations: usize,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
}

/// States sampled at `options.sample_count` evenly spaced times.
#[derive(Clone, Debug)]
pub struct OdeSolution<const N: usize> {
    pub t: Vec<f64>,
    pub y: Vec<[f64; N]>,
    pub stats: SolveStats,
}

/// Right-hand side with an evaluation budget and a finiteness check.
struct Counted<'m, M> {
    model: &'m mut M,
    budget: usize,
    stats: SolveStats,
}

impl<M> Counted<'_, M> {
    fn eval<const N: usize>(&mut self, t: f64, y: &[f64; N]) -> SimResult<[f64; N]>
    where
        M: TransientModel<N>,
    {
        if self.stats.evaluations >= self.budget {
            return Err(SimError::BudgetExhausted {
                budget: self.budget,
                t,
            });
        }
        self.stats.evaluations += 1;
        let dy = self.model.rhs(t, y)?;
        if dy.iter().any(|v| !v.is_finite()) {
            return Err(SimError::NonFinite { t });
        }
        Ok(dy)
    }
}

fn rms_norm<const N: usize>(x: &[f64; N]) -> f64 {
    if N == 0 {
        return 0.0;
    }
    (x.iter().map(|v| v * v).sum::<f64>() / N as f64).sqrt()
}

/// State at `t + sigma * h` from the stages `k` of the step taken from
/// `(t, y)`.
fn dense_output<const N: usize>(
    tab: &Tableau,
    y: &[f64; N],
    k: &[[f64; N]],
    h: f64,
    sigma: f64,
) -> [f64; N] {
    let mut out = *y;
    for (j, kj) in k.iter().enumerate() {
        let w = h * tab.dense_weight(j, sigma);
        if w != 0.0 {
            for (o, d) in out.iter_mut().zip(kj) {
                *o += w * d;
            }
        }
    }
    out
}

/// Starting step from the size of the state and its first two derivatives.
fn initial_step<M, const N: usize>(
    rhs: &mut Counted<'_, M>,
    t0: f64,
    y0: &[f64; N],
    f0: &[f64; N],
    tab: &Tableau,
    opts: &SimOptions,
) -> SimResult<f64>
where
    M: TransientModel<N>,
{
    let span = opts.t_end - opts.t_start;
    let scale: [f64; N] = from_fn(|i| opts.atol + y0[i].abs() * opts.rtol);
    let d0 = rms_norm::<N>(&from_fn(|i| y0[i] / scale[i]));
    let d1 = rms_norm::<N>(&from_fn(|i| f0[i] / scale[i]));

    let h0 = if d0 < 1e-5 || d1 < 1e-5 { 1e-6 } else { 0.01 * d0 / d1 };
    let h0 = h0.min(span);

    let y1: [f64; N] = from_fn(|i| y0[i] + h0 * f0[i]);
    let f1 = rhs.eval(t0 + h0, &y1)?;
    let d2 = rms_norm::<N>(&from_fn(|i| (f1[i] - f0[i]) / scale[i])) / h0;

    let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / (tab.error_order as f64 + 1.0))
    };
    Ok((100.0 * h0).min(h1).min(span))
}

/// Integrate `model` from `y0` over `[opts.t_start, opts.t_end]`.
///
/// # Errors
/// `InvalidArg` for bad options; `StepSizeUnderflow`, `BudgetExhausted` or
/// `NonFinite` when integration cannot finish; model errors as returned by
/// `rhs`. The failure carries the work done before it stopped.
pub fn solve<M, const N: usize>(
    model: &mut M,
    y0: [f64; N],
    opts: &SimOptions,
) -> Result<OdeSolution<N>, SolveFailure>
where
    M: TransientModel<N>,
{
    opts.validate()?;
    if y0.iter().any(|v| !v.is_finite()) {
        return Err(SimError::InvalidArg {
            what: "initial state must be finite",
        }
        .into());
    }

    let t_out = linspace(opts.t_start, opts.t_end, opts.sample_count);
    let mut rhs = Counted {
        model,
        budget: opts.max_evaluations,
        stats: SolveStats::default(),
    };

    let result = integrate(&mut rhs, y0, opts, &t_out);
    let stats = rhs.stats;
    match result {
        Ok(y) => {
            debug!(
                evaluations = stats.evaluations,
                accepted = stats.accepted_steps,
                rejected = stats.rejected_steps,
                "integration finished"
            );
            Ok(OdeSolution { t: t_out, y, stats })
        }
        Err(error) => Err(SolveFailure { error, stats }),
    }
}

/// Step from `opts.t_start` to `opts.t_end`, returning the states at `t_out`.
fn integrate<M, const N: usize>(
    rhs: &mut Counted<'_, M>,
    y0: [f64; N],
    opts: &SimOptions,
    t_out: &[f64],
) -> SimResult<Vec<[f64; N]>>
where
    M: TransientModel<N>,
{
    let tab = opts.method.tableau();
    let stages = tab.stages();
    let mut y_out = Vec::with_capacity(t_out.len());
    y_out.push(y0);
    let mut next_out = 1;

    let t_end = opts.t_end;
    let max_step = opts.max_step.unwrap_or(f64::INFINITY);
    let mut t = opts.t_start;
    let mut y = y0;
    let mut f = rhs.eval(t, &y)?;
    let mut h_abs = match opts.first_step {
        Some(h) => h,
        None => initial_step(rhs, t, &y, &f, tab, opts)?,
    };
    debug!(method = tab.name, h0 = h_abs, "starting integration");

    let mut k = vec![[0.0; N]; stages + 1];
    let exponent = tab.error_exponent();

    while t < t_end {
        let min_step = (10.0 * f64::EPSILON * t.abs()).max(f64::MIN_POSITIVE);
        h_abs = h_abs.min(max_step).max(min_step);

        let mut rejected = false;
        loop {
            if h_abs < min_step {
                return Err(SimError::StepSizeUnderflow { t, h: h_abs });
            }
            let t_new = (t + h_abs).min(t_end);
            let h = t_new - t;

            k[0] = f;
            for i in 1..stages {
                let row = tab.a[i];
                let yi: [f64; N] = from_fn(|c| {
                    y[c] + h * row.iter().zip(&k).map(|(a, kj)| a * kj[c]).sum::<f64>()
                });
                k[i] = rhs.eval(t + tab.c[i] * h, &yi)?;
            }
            let y_new: [f64; N] =
                from_fn(|c| y[c] + h * tab.b.iter().zip(&k).map(|(b, kj)| b * kj[c]).sum::<f64>());
            let f_new = rhs.eval(t_new, &y_new)?;
            k[stages] = f_new;

            let scaled_err: [f64; N] = from_fn(|c| {
                let e: f64 = (0..=stages).map(|j| tab.error_weight(j) * k[j][c]).sum();
                h * e / (opts.atol + opts.rtol * y[c].abs().max(y_new[c].abs()))
            });
            let err_norm = rms_norm(&scaled_err);

            if err_norm <= 1.0 {
                let mut factor = if err_norm == 0.0 {
                    MAX_FACTOR
                } else {
                    MAX_FACTOR.min(SAFETY * err_norm.powf(exponent))
                };
                if rejected {
                    factor = factor.min(1.0);
                }

                while next_out < t_out.len() && t_out[next_out] <= t_new {
                    let ts = t_out[next_out];
                    y_out.push(if ts == t_new {
                        y_new
                    } else {
                        dense_output(tab, &y, &k, h, (ts - t) / h)
                    });
                    next_out += 1;
                }

                t = t_new;
                y = y_new;
                f = f_new;
                h_abs = h * factor;
                rhs.stats.accepted_steps += 1;
                break;
            }

            h_abs = h * MIN_FACTOR.max(SAFETY * err_norm.powf(exponent));
            rejected = true;
            rhs.stats.rejected_steps += 1;
            trace!(t, h, err_norm, "step rejected");
        }
    }

    Ok(y_out)
}
