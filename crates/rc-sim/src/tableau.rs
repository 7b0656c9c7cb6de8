//! Butcher tableaus for embedded explicit Runge–Kutta pairs.
//!
//! Both pairs are first-same-as-last: the derivative at the accepted point is
//! the first stage of the next step, and it also enters the error estimate
//! with weight `b̂[s]`. Each pair also carries the coefficients of its
//! continuous extension, so output between accepted points reuses the stages
//! the step already evaluated.

/// Coefficients of an embedded pair with `s` stages.
#[derive(Debug)]
pub struct Tableau {
    pub name: &'static str,
    /// Node offsets, length `s`.
    pub c: &'static [f64],
    /// Lower-triangular stage matrix; row `i` has `i` entries.
    pub a: &'static [&'static [f64]],
    /// Propagated solution weights, length `s`.
    pub b: &'static [f64],
    /// Embedded solution weights, length `s + 1` (last one multiplies the
    /// derivative at the new point).
    pub b_hat: &'static [f64],
    /// Order of the embedded error estimate.
    pub error_order: u32,
    /// Continuous extension, one row per stage plus the new-point
    /// derivative. Column `p` multiplies `σ^(p+1)` for `σ ∈ [0, 1]`.
    pub dense: &'static [&'static [f64]],
}

impl Tableau {
    pub fn stages(&self) -> usize {
        self.b.len()
    }

    /// Weight of stage `j` in the local error `y − ŷ`; `j == stages()` is the
    /// new-point derivative.
    pub fn error_weight(&self, j: usize) -> f64 {
        let b = self.b.get(j).copied().unwrap_or(0.0);
        b - self.b_hat[j]
    }

    /// Weight of stage `j` in the interpolant at fraction `sigma` of the step.
    pub fn dense_weight(&self, j: usize, sigma: f64) -> f64 {
        let mut power = 1.0;
        self.dense[j]
            .iter()
            .map(|p| {
                power *= sigma;
                p * power
            })
            .sum()
    }

    /// Exponent applied to the error norm when rescaling the step.
    pub fn error_exponent(&self) -> f64 {
        -1.0 / (self.error_order as f64 + 1.0)
    }
}

pub static DORMAND_PRINCE_54: Tableau = Tableau {
    name: "Dormand-Prince 5(4)",
    c: &[0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0],
    a: &[
        &[],
        &[1.0 / 5.0],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
        &[19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0],
        &[
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
        ],
    ],
    b: &[
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
    b_hat: &[
        5179.0 / 57600.0,
        0.0,
        7571.0 / 16695.0,
        393.0 / 640.0,
        -92097.0 / 339200.0,
        187.0 / 2100.0,
        1.0 / 40.0,
    ],
    error_order: 4,
    dense: &[
        &[
            1.0,
            -8048581381.0 / 2820520608.0,
            8663915743.0 / 2820520608.0,
            -12715105075.0 / 11282082432.0,
        ],
        &[0.0, 0.0, 0.0, 0.0],
        &[
            0.0,
            131558114200.0 / 32700410799.0,
            -68118460800.0 / 10900136933.0,
            87487479700.0 / 32700410799.0,
        ],
        &[
            0.0,
            -1754552775.0 / 470086768.0,
            14199869525.0 / 1410260304.0,
            -10690763975.0 / 1880347072.0,
        ],
        &[
            0.0,
            127303824393.0 / 49829197408.0,
            -318862633887.0 / 49829197408.0,
            701980252875.0 / 199316789632.0,
        ],
        &[
            0.0,
            -282668133.0 / 205662961.0,
            2019193451.0 / 616988883.0,
            -1453857185.0 / 822651844.0,
        ],
        &[
            0.0,
            40617522.0 / 29380423.0,
            -110615467.0 / 29380423.0,
            69997945.0 / 29380423.0,
        ],
    ],
};

pub static BOGACKI_SHAMPINE_32: Tableau = Tableau {
    name: "Bogacki-Shampine 3(2)",
    c: &[0.0, 1.0 / 2.0, 3.0 / 4.0],
    a: &[&[], &[1.0 / 2.0], &[0.0, 3.0 / 4.0]],
    b: &[2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0],
    b_hat: &[7.0 / 24.0, 1.0 / 4.0, 1.0 / 3.0, 1.0 / 8.0],
    error_order: 2,
    dense: &[
        &[1.0, -4.0 / 3.0, 5.0 / 9.0],
        &[0.0, 1.0, -2.0 / 3.0],
        &[0.0, 4.0 / 3.0, -8.0 / 9.0],
        &[0.0, -1.0, 1.0],
    ],
};
