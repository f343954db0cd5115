//! Diffuse likelihood of a fitted model and the `BsmFit` handle combining
//! a model with the likelihood evaluated on its series.

use sts_core::errors::Result;
use sts_core::{ensure, Real, TsData};

use crate::data::{ExtendedSsfData, SsfData};
use crate::model::BasicStructuralModel;
use crate::smoother::filter;

/// Prediction-error log-likelihood and standardized one-step residuals,
/// with the diffuse burn-in excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffuseLikelihood {
    log_likelihood: Real,
    residuals: Vec<Real>,
}

impl DiffuseLikelihood {
    pub(crate) fn new(log_likelihood: Real, residuals: Vec<Real>) -> Self {
        Self {
            log_likelihood,
            residuals,
        }
    }

    /// The log-likelihood value.
    pub fn log_likelihood(&self) -> Real {
        self.log_likelihood
    }

    /// Standardized one-step-ahead prediction residuals.
    pub fn residuals(&self) -> &[Real] {
        &self.residuals
    }
}

/// A fitted basic structural model together with its likelihood.
///
/// Parameter estimation is out of scope here: the model arrives with its
/// variances already set, and `BsmFit::new` evaluates the likelihood and
/// residuals on the supplied series.
#[derive(Debug, Clone)]
pub struct BsmFit {
    model: BasicStructuralModel,
    likelihood: DiffuseLikelihood,
}

impl BsmFit {
    /// Evaluate `model` on `y`.
    pub fn new(model: BasicStructuralModel, y: &TsData) -> Result<Self> {
        ensure!(!y.is_empty(), "cannot fit a model on an empty series");
        ensure!(
            y.frequency() == model.frequency(),
            "series frequency {} does not match the model frequency {}",
            y.frequency(),
            model.frequency()
        );
        let data = ExtendedSsfData::new(SsfData::from(y), 0);
        let pass = filter(&model, &data)?;
        Ok(Self {
            model,
            likelihood: DiffuseLikelihood::new(pass.log_likelihood, pass.residuals),
        })
    }

    /// The fitted model.
    pub fn model(&self) -> &BasicStructuralModel {
        &self.model
    }

    /// The likelihood evaluated on the fitted series.
    pub fn likelihood(&self) -> &DiffuseLikelihood {
        &self.likelihood
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BsmSpec;
    use sts_core::{TsFrequency, TsPeriod};

    #[test]
    fn fit_evaluates_likelihood() {
        let model =
            BasicStructuralModel::new(BsmSpec::default(), TsFrequency::Quarterly).unwrap();
        let start = TsPeriod::new(TsFrequency::Quarterly, 2000, 0).unwrap();
        let y = TsData::new(start, (0..20).map(|i| (i as f64).sin() + 10.0).collect());
        let fit = BsmFit::new(model, &y).unwrap();
        assert!(fit.likelihood().log_likelihood().is_finite());
        assert_eq!(
            fit.likelihood().residuals().len(),
            20 - fit.model().diffuse_dim()
        );
    }

    #[test]
    fn frequency_mismatch_rejected() {
        let model =
            BasicStructuralModel::new(BsmSpec::default(), TsFrequency::Quarterly).unwrap();
        let start = TsPeriod::new(TsFrequency::Monthly, 2000, 0).unwrap();
        let y = TsData::new(start, vec![1.0; 24]);
        assert!(BsmFit::new(model, &y).is_err());
    }
}
