//! Kalman filtering and fixed-interval smoothing for structural models.
//!
//! The filter runs a standard prediction/update recursion with a
//! large-kappa diffuse prior on nonstationary state elements; missing
//! observations (`NaN`) skip the measurement update, which is also how the
//! forecast tail of an [`ExtendedSsfData`] is handled.  The smoother runs
//! a Rauch-Tung-Striebel backward pass over the stored filter moments.

use nalgebra::{DMatrix, DVector};
use sts_core::errors::{Error, Result};
use sts_core::Real;

use crate::data::ExtendedSsfData;
use crate::model::BasicStructuralModel;

/// Prediction variances below this threshold are treated as degenerate and
/// the corresponding update is skipped.
const MIN_VARIANCE: Real = 1e-12;

/// Forward filter output kept for the backward pass and the likelihood.
pub(crate) struct FilterPass {
    pub a_pred: Vec<DVector<Real>>,
    pub p_pred: Vec<DMatrix<Real>>,
    pub a_filt: Vec<DVector<Real>>,
    pub p_filt: Vec<DMatrix<Real>>,
    pub log_likelihood: Real,
    pub residuals: Vec<Real>,
}

/// Run the forward filter over `data`.
///
/// The log-likelihood uses the prediction-error decomposition; the first
/// `diffuse_dim` non-missing observations are burn-in and contribute
/// neither to the likelihood nor to the standardized residuals.
pub(crate) fn filter(
    model: &BasicStructuralModel,
    data: &ExtendedSsfData,
) -> Result<FilterPass> {
    let n = data.len();
    if n == 0 {
        return Err(Error::InvalidArgument("empty observation set".into()));
    }
    let t_mat = model.transition();
    let z = model.measurement();
    let q = model.innovation_cov();
    let (mut a, mut p) = model.initial_state();
    let burn_in = model.diffuse_dim();

    let mut pass = FilterPass {
        a_pred: Vec::with_capacity(n),
        p_pred: Vec::with_capacity(n),
        a_filt: Vec::with_capacity(n),
        p_filt: Vec::with_capacity(n),
        log_likelihood: 0.0,
        residuals: Vec::new(),
    };

    let ln_2pi = (2.0 * std::f64::consts::PI).ln();
    let mut observed = 0usize;
    for t in 0..n {
        pass.a_pred.push(a.clone());
        pass.p_pred.push(p.clone());

        let y = data.get(t);
        if y.is_finite() {
            let pz = &p * &z;
            let f = z.dot(&pz);
            if f > MIN_VARIANCE {
                let v = y - z.dot(&a);
                let k = pz / f;
                a += &k * v;
                p = &p - (&k * k.transpose()) * f;
                observed += 1;
                if observed > burn_in {
                    pass.log_likelihood -= 0.5 * (ln_2pi + f.ln() + v * v / f);
                    pass.residuals.push(v / f.sqrt());
                }
            }
        }
        pass.a_filt.push(a.clone());
        pass.p_filt.push(p.clone());

        a = &t_mat * &a;
        p = &t_mat * &p * t_mat.transpose() + &q;
        p = (&p + p.transpose()) * 0.5;
    }
    Ok(pass)
}

/// Smoothed state estimates over the full (extended) domain.
#[derive(Debug, Clone)]
pub struct SmoothingResults {
    states: Vec<DVector<Real>>,
}

impl SmoothingResults {
    /// Number of time points.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no time points were smoothed.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The smoothed state vector at time `t`.
    pub fn state(&self, t: usize) -> &DVector<Real> {
        &self.states[t]
    }

    /// The smoothed estimates of state element `pos` over all time points.
    pub fn component(&self, pos: usize) -> Vec<Real> {
        self.states.iter().map(|s| s[pos]).collect()
    }
}

/// Fixed-interval smoother for a basic structural model.
pub struct Smoother<'a> {
    model: &'a BasicStructuralModel,
}

impl<'a> Smoother<'a> {
    /// Create a smoother bound to `model`.
    pub fn new(model: &'a BasicStructuralModel) -> Self {
        Self { model }
    }

    /// Smooth `data`, returning one state estimate per time point.
    pub fn process(&self, data: &ExtendedSsfData) -> Result<SmoothingResults> {
        let pass = filter(self.model, data)?;
        let n = data.len();
        let t_mat = self.model.transition();

        let mut states = vec![DVector::zeros(0); n];
        states[n - 1] = pass.a_filt[n - 1].clone();
        for t in (0..n - 1).rev() {
            let inv = pass.p_pred[t + 1]
                .clone()
                .pseudo_inverse(1e-10)
                .map_err(|e| Error::Configuration(format!("smoothing failed: {e}")))?;
            let gain = &pass.p_filt[t] * t_mat.transpose() * inv;
            let corrected =
                &pass.a_filt[t] + &gain * (&states[t + 1] - &pass.a_pred[t + 1]);
            states[t] = corrected;
        }
        Ok(SmoothingResults { states })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
