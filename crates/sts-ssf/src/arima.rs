//! ARIMA building blocks: lag polynomials, moving-average autocovariances,
//! and a spectral factorization based on the innovations algorithm.
//!
//! Polynomials are coefficient vectors in the lag operator, constant term
//! first: `[1, c1, c2]` stands for `1 + c1·B + c2·B²`.

use sts_core::errors::Result;
use sts_core::{ensure, Real};

/// Product of two lag polynomials.
pub fn convolve(a: &[Real], b: &[Real]) -> Vec<Real> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Autocovariances `γ(0..q)` of the pure MA process `c(B)·ε`, with
/// `Var(ε) = var`.
pub fn ma_autocovariances(c: &[Real], var: Real) -> Vec<Real> {
    (0..c.len())
        .map(|k| var * c[..c.len() - k].iter().zip(&c[k..]).map(|(x, y)| x * y).sum::<Real>())
        .collect()
}

/// Recover an invertible MA polynomial and innovation variance from the
/// autocovariances `γ(0..q)` of a moving-average process.
///
/// Uses the innovations algorithm: the one-step prediction variance
/// converges to the innovation variance and the last row of prediction
/// coefficients converges to the MA coefficients.  Degenerate inputs
/// (`γ(0) ≤ 0`) yield a zero-variance white noise.
pub fn factorize_ma(gamma: &[Real]) -> (Vec<Real>, Real) {
    let q = gamma.len().saturating_sub(1);
    if gamma.is_empty() || gamma[0] <= 0.0 {
        return (vec![1.0], 0.0);
    }
    if q == 0 {
        return (vec![1.0], gamma[0]);
    }
    let acov = |k: usize| if k <= q { gamma[k] } else { 0.0 };

    let n_max = 60 + 10 * q;
    let mut theta = vec![vec![0.0; n_max + 1]; n_max + 1];
    let mut v = vec![0.0; n_max + 1];
    v[0] = gamma[0];
    let mut n_last = 0;
    for n in 1..=n_max {
        for k in 0..n {
            if v[k].abs() < 1e-300 {
                theta[n][n - k] = 0.0;
                continue;
            }
            let mut num = acov(n - k);
            for j in 0..k {
                num -= theta[k][k - j] * theta[n][n - j] * v[j];
            }
            theta[n][n - k] = num / v[k];
        }
        let mut vn = gamma[0];
        for j in 0..n {
            vn -= theta[n][n - j] * theta[n][n - j] * v[j];
        }
        v[n] = vn.max(0.0);
        n_last = n;
        if n > q && (v[n] - v[n - 1]).abs() <= 1e-12 * v[n].abs().max(1e-300) {
            break;
        }
    }
    let mut ma = Vec::with_capacity(q + 1);
    ma.push(1.0);
    for k in 1..=q {
        ma.push(theta[n_last][k]);
    }
    (ma, v[n_last])
}

/// An ARIMA model: stationary autoregression, differencing operator,
/// moving average, and innovation variance.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaModel {
    ar: Vec<Real>,
    diff: Vec<Real>,
    ma: Vec<Real>,
    var: Real,
}

impl ArimaModel {
    /// Create an ARIMA model from its lag polynomials.
    ///
    /// All polynomials must be monic (leading coefficient 1) and the
    /// innovation variance non-negative.
    pub fn new(ar: Vec<Real>, diff: Vec<Real>, ma: Vec<Real>, var: Real) -> Result<Self> {
        ensure!(
            ar.first() == Some(&1.0) && diff.first() == Some(&1.0) && ma.first() == Some(&1.0),
            "ARIMA polynomials must be monic"
        );
        ensure!(
            var.is_finite() && var >= 0.0,
            "innovation variance must be finite and non-negative, got {var}"
        );
        Ok(Self { ar, diff, ma, var })
    }

    /// Internal constructor for polynomials already known to be monic.
    pub(crate) fn from_parts(ar: Vec<Real>, diff: Vec<Real>, ma: Vec<Real>, var: Real) -> Self {
        debug_assert!(ar.first() == Some(&1.0) && diff.first() == Some(&1.0));
        Self { ar, diff, ma, var }
    }

    /// A white-noise model with the given variance.
    pub fn white_noise(var: Real) -> Self {
        Self {
            ar: vec![1.0],
            diff: vec![1.0],
            ma: vec![1.0],
            var,
        }
    }

    /// Stationary autoregressive polynomial.
    pub fn ar(&self) -> &[Real] {
        &self.ar
    }

    /// Differencing (nonstationary autoregressive) polynomial.
    pub fn diff(&self) -> &[Real] {
        &self.diff
    }

    /// Moving-average polynomial.
    pub fn ma(&self) -> &[Real] {
        &self.ma
    }

    /// Innovation variance.
    pub fn innovation_variance(&self) -> Real {
        self.var
    }

    /// Product of the stationary and differencing polynomials.
    pub fn full_ar(&self) -> Vec<Real> {
        convolve(&self.ar, &self.diff)
    }

    /// Multiply the innovation variance by `factor`.
    pub fn scale_variance(&mut self, factor: Real) {
        self.var *= factor;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
