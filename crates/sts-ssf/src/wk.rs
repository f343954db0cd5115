//! Wiener-Kolmogorov estimators derived from a reduced (UCARIMA) model.
//!
//! Signal-extraction queries work on the common-denominator form of the
//! reduced model: each component's share of the aggregate moving-average
//! variance measures how much of the observed variation its
//! minimum-mean-squared-error estimator captures.

use sts_core::Real;

use crate::arima::ArimaModel;
use crate::ucarima::UcarimaModel;

/// Signal-extraction estimators for the components of a reduced model.
#[derive(Debug, Clone)]
pub struct WienerKolmogorovEstimators {
    model: UcarimaModel,
}

impl WienerKolmogorovEstimators {
    /// Build estimators on top of `model` (normally the normalized
    /// reduced form).
    pub fn new(model: UcarimaModel) -> Self {
        Self { model }
    }

    /// The underlying reduced model.
    pub fn ucarima_model(&self) -> &UcarimaModel {
        &self.model
    }

    /// Number of components.
    pub fn n_components(&self) -> usize {
        self.model.n_components()
    }

    /// The ARIMA model of component `cmp`.
    pub fn component_model(&self, cmp: usize) -> &ArimaModel {
        self.model.component(cmp)
    }

    /// Share of the aggregate moving-average variance attributable to
    /// component `cmp`, in `[0, 1]`.  Returns 0 for a degenerate model.
    pub fn variance_share(&self, cmp: usize) -> Real {
        let total = self.model.aggregate_acov().first().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return 0.0;
        }
        let own = self.model.component_acov(cmp).first().copied().unwrap_or(0.0);
        own / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn shares_sum_to_one() {
        let ucm = UcarimaModel::new(vec![
            ArimaModel::white_noise(1.0),
            ArimaModel::white_noise(3.0),
        ]);
        let wk = WienerKolmogorovEstimators::new(ucm);
        assert_abs_diff_eq!(wk.variance_share(0), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(wk.variance_share(1), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_model_has_zero_share() {
        let wk = WienerKolmogorovEstimators::new(UcarimaModel::new(vec![
            ArimaModel::white_noise(0.0),
        ]));
        assert_eq!(wk.variance_share(0), 0.0);
    }
}
