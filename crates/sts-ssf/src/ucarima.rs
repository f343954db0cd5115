//! UCARIMA models: a sum of orthogonal ARIMA components with an aggregate
//! reduced form and a normalization that rescales innovation variances by
//! the aggregate innovation variance.

use sts_core::Real;

use crate::arima::{convolve, factorize_ma, ma_autocovariances, ArimaModel};

/// An unobserved-components ARIMA model: the observed series is the sum of
/// mutually orthogonal ARIMA components.
#[derive(Debug, Clone, PartialEq)]
pub struct UcarimaModel {
    components: Vec<ArimaModel>,
}

impl UcarimaModel {
    /// Create a model from its component list.
    pub fn new(components: Vec<ArimaModel>) -> Self {
        Self { components }
    }

    /// Number of components.
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// All components.
    pub fn components(&self) -> &[ArimaModel] {
        &self.components
    }

    /// Component `i`.
    pub fn component(&self, i: usize) -> &ArimaModel {
        &self.components[i]
    }

    /// Moving-average-side autocovariances of component `i` after
    /// multiplication by every other component's full autoregressive
    /// polynomial (the common-denominator numerator of the sum).
    pub fn component_acov(&self, i: usize) -> Vec<Real> {
        let mut num = self.components[i].ma().to_vec();
        for (j, c) in self.components.iter().enumerate() {
            if j != i {
                num = convolve(&num, &c.full_ar());
            }
        }
        ma_autocovariances(&num, self.components[i].innovation_variance())
    }

    /// Autocovariances of the aggregate moving-average side.
    pub fn aggregate_acov(&self) -> Vec<Real> {
        let mut gamma: Vec<Real> = Vec::new();
        for i in 0..self.components.len() {
            let g = self.component_acov(i);
            if g.len() > gamma.len() {
                gamma.resize(g.len(), 0.0);
            }
            for (k, v) in g.iter().enumerate() {
                gamma[k] += v;
            }
        }
        gamma
    }

    /// The aggregate (reduced-form) ARIMA model of the sum.
    ///
    /// Its autoregressive side is the product of the components' full
    /// autoregressive polynomials; its moving-average side and innovation
    /// variance come from factorizing the aggregate autocovariances.
    pub fn sum(&self) -> ArimaModel {
        let mut ar = vec![1.0];
        let mut diff = vec![1.0];
        for c in &self.components {
            ar = convolve(&ar, c.ar());
            diff = convolve(&diff, c.diff());
        }
        let (ma, var) = factorize_ma(&self.aggregate_acov());
        ArimaModel::from_parts(ar, diff, ma, var)
    }

    /// Rescale every component's innovation variance by the aggregate
    /// innovation variance, and return that variance (the error-scaling
    /// factor).  A degenerate aggregate (zero variance) leaves the model
    /// untouched and returns 0.
    pub fn normalize(&mut self) -> Real {
        let var = self.sum().innovation_variance();
        if var > 0.0 {
            for c in &mut self.components {
                c.scale_variance(1.0 / var);
            }
        }
        var
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sum_of_white_noise_is_white_noise() {
        let ucm = UcarimaModel::new(vec![
            ArimaModel::white_noise(1.0),
            ArimaModel::white_noise(3.0),
        ]);
        let sum = ucm.sum();
        assert_abs_diff_eq!(sum.innovation_variance(), 4.0, epsilon = 1e-9);
        assert_eq!(sum.full_ar(), vec![1.0]);
    }

    #[test]
    fn random_walk_plus_noise_reduces_to_ima11() {
        // local level: (1-B) m = w (var q), plus white noise (var 1)
        // reduced form is an IMA(1,1); its γ are γ0 = q + 2, γ1 = -1 on
        // the differenced scale.
        let level = ArimaModel::new(vec![1.0], vec![1.0, -1.0], vec![1.0], 0.5).unwrap();
        let ucm = UcarimaModel::new(vec![level, ArimaModel::white_noise(1.0)]);
        let gamma = ucm.aggregate_acov();
        assert_abs_diff_eq!(gamma[0], 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(gamma[1], -1.0, epsilon = 1e-12);
        let sum = ucm.sum();
        assert_eq!(sum.diff(), &[1.0, -1.0]);
        assert_eq!(sum.ma().len(), 2);
        // factorization must reproduce the aggregate autocovariances
        let g = ma_autocovariances(sum.ma(), sum.innovation_variance());
        assert_abs_diff_eq!(g[0], gamma[0], epsilon = 1e-6);
        assert_abs_diff_eq!(g[1], gamma[1], epsilon = 1e-6);
    }

    #[test]
    fn normalize_rescales_to_unit_innovation_variance() {
        let level = ArimaModel::new(vec![1.0], vec![1.0, -1.0], vec![1.0], 2.0).unwrap();
        let mut ucm = UcarimaModel::new(vec![level, ArimaModel::white_noise(3.0)]);
        let factor = ucm.normalize();
        assert!(factor > 0.0);
        let var_after = ucm.sum().innovation_variance();
        assert_abs_diff_eq!(var_after, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn normalize_degenerate_model() {
        let mut ucm = UcarimaModel::new(vec![ArimaModel::white_noise(0.0)]);
        assert_eq!(ucm.normalize(), 0.0);
    }
}
