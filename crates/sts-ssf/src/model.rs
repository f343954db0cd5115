//! Basic structural model: component presence flags, innovation variances,
//! state-space system matrices, and the reduced-form (UCARIMA) computation.
//!
//! State layout is fixed: noise (1 state), cycle (2), level (1), slope (1),
//! seasonal (frequency − 1), with absent components omitted.
//! `cmp_positions` returns the first state index of each present component
//! in that order.

use nalgebra::{DMatrix, DVector};
use sts_core::errors::{Error, Result};
use sts_core::{ensure, Real, TsFrequency};

use crate::arima::{factorize_ma, ArimaModel};
use crate::ucarima::UcarimaModel;

/// Prior variance assigned to diffuse (nonstationary) state elements.
const DIFFUSE_KAPPA: Real = 1e8;

/// An unobserved component of a structural model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Irregular (white noise) component.
    Noise,
    /// Stochastic cycle.
    Cycle,
    /// Local level.
    Level,
    /// Slope of the local level.
    Slope,
    /// Seasonal component (dummy form).
    Seasonal,
}

/// Presence flags of the structural components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsmSpec {
    /// Irregular component present.
    pub noise: bool,
    /// Cycle present.
    pub cycle: bool,
    /// Level present.
    pub level: bool,
    /// Slope present (requires level).
    pub slope: bool,
    /// Seasonal component present.
    pub seasonal: bool,
}

impl Default for BsmSpec {
    /// The local linear trend + seasonal + noise specification.
    fn default() -> Self {
        Self {
            noise: true,
            cycle: false,
            level: true,
            slope: true,
            seasonal: true,
        }
    }
}

impl BsmSpec {
    /// Whether `component` is declared present.
    pub fn has(&self, component: Component) -> bool {
        match component {
            Component::Noise => self.noise,
            Component::Cycle => self.cycle,
            Component::Level => self.level,
            Component::Slope => self.slope,
            Component::Seasonal => self.seasonal,
        }
    }

    /// Number of declared components.
    pub fn n_components(&self) -> usize {
        [self.noise, self.cycle, self.level, self.slope, self.seasonal]
            .iter()
            .filter(|&&b| b)
            .count()
    }

    /// Check structural consistency of the flags.
    pub fn validate(&self) -> Result<()> {
        if self.slope && !self.level {
            return Err(Error::Configuration(
                "slope requires a level component".into(),
            ));
        }
        if !(self.noise || self.cycle || self.level || self.seasonal) {
            return Err(Error::Configuration(
                "the model must declare at least one component".into(),
            ));
        }
        Ok(())
    }
}

/// A fitted basic structural model.
///
/// Holds the component specification, the innovation variances, and the
/// cycle parameters; exposes the state-space form consumed by the
/// filter/smoother and the reduced-form computation.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicStructuralModel {
    spec: BsmSpec,
    freq: TsFrequency,
    var_noise: Real,
    var_cycle: Real,
    var_level: Real,
    var_slope: Real,
    var_seasonal: Real,
    cycle_rho: Real,
    cycle_period: Real,
}

impl BasicStructuralModel {
    /// Create a model with unit variances for every present component.
    ///
    /// A seasonal component needs at least two periods per year.
    pub fn new(spec: BsmSpec, freq: TsFrequency) -> Result<Self> {
        spec.validate()?;
        if spec.seasonal && freq.periods_per_year() < 2 {
            return Err(Error::Configuration(format!(
                "a seasonal component needs at least 2 periods per year, got {freq}"
            )));
        }
        let var = |present: bool| if present { 1.0 } else { 0.0 };
        Ok(Self {
            spec,
            freq,
            var_noise: var(spec.noise),
            var_cycle: var(spec.cycle),
            var_level: var(spec.level),
            var_slope: var(spec.slope),
            var_seasonal: var(spec.seasonal),
            cycle_rho: 0.9,
            cycle_period: 6.0 * freq.periods_per_year() as Real,
        })
    }

    /// Component specification.
    pub fn spec(&self) -> BsmSpec {
        self.spec
    }

    /// Frequency of the series this model was fitted on.
    pub fn frequency(&self) -> TsFrequency {
        self.freq
    }

    /// Length of one seasonal cycle.
    pub fn seasonal_length(&self) -> usize {
        self.freq.periods_per_year()
    }

    /// Innovation variance of `component` (0 when absent).
    pub fn variance(&self, component: Component) -> Real {
        match component {
            Component::Noise => self.var_noise,
            Component::Cycle => self.var_cycle,
            Component::Level => self.var_level,
            Component::Slope => self.var_slope,
            Component::Seasonal => self.var_seasonal,
        }
    }

    /// Set the innovation variance of a present component.
    pub fn set_variance(&mut self, component: Component, var: Real) -> Result<()> {
        ensure!(
            var.is_finite() && var >= 0.0,
            "variance must be finite and non-negative, got {var}"
        );
        ensure!(
            self.spec.has(component),
            "cannot set the variance of an absent component"
        );
        match component {
            Component::Noise => self.var_noise = var,
            Component::Cycle => self.var_cycle = var,
            Component::Level => self.var_level = var,
            Component::Slope => self.var_slope = var,
            Component::Seasonal => self.var_seasonal = var,
        }
        Ok(())
    }

    /// Set the cycle damping factor `rho` and period (in periods).
    pub fn set_cycle(&mut self, rho: Real, period: Real) -> Result<()> {
        ensure!(self.spec.cycle, "the model declares no cycle");
        ensure!(rho > 0.0 && rho < 1.0, "cycle damping must lie in (0, 1), got {rho}");
        ensure!(period > 2.0, "cycle period must exceed 2 periods, got {period}");
        self.cycle_rho = rho;
        self.cycle_period = period;
        Ok(())
    }

    /// Cycle damping factor.
    pub fn cycle_rho(&self) -> Real {
        self.cycle_rho
    }

    /// Cycle period, in periods.
    pub fn cycle_period(&self) -> Real {
        self.cycle_period
    }

    fn cycle_lambda(&self) -> Real {
        2.0 * std::f64::consts::PI / self.cycle_period
    }

    // ── State-space form ─────────────────────────────────────────────────

    /// Dimension of the state vector.
    pub fn state_dim(&self) -> usize {
        let mut dim = 0;
        if self.spec.noise {
            dim += 1;
        }
        if self.spec.cycle {
            dim += 2;
        }
        if self.spec.level {
            dim += 1;
        }
        if self.spec.slope {
            dim += 1;
        }
        if self.spec.seasonal {
            dim += self.seasonal_length() - 1;
        }
        dim
    }

    /// First state index of each present component, in the fixed order
    /// noise, cycle, level, slope, seasonal.
    pub fn cmp_positions(&self) -> Vec<usize> {
        let mut positions = Vec::with_capacity(self.spec.n_components());
        let mut cur = 0;
        if self.spec.noise {
            positions.push(cur);
            cur += 1;
        }
        if self.spec.cycle {
            positions.push(cur);
            cur += 2;
        }
        if self.spec.level {
            positions.push(cur);
            cur += 1;
            if self.spec.slope {
                positions.push(cur);
                cur += 1;
            }
        }
        if self.spec.seasonal {
            positions.push(cur);
        }
        positions
    }

    /// Transition matrix `T`.
    pub fn transition(&self) -> DMatrix<Real> {
        let m = self.state_dim();
        let mut t = DMatrix::zeros(m, m);
        let mut cur = 0;
        if self.spec.noise {
            // noise is redrawn each period: zero row
            cur += 1;
        }
        if self.spec.cycle {
            let (rho, lam) = (self.cycle_rho, self.cycle_lambda());
            t[(cur, cur)] = rho * lam.cos();
            t[(cur, cur + 1)] = rho * lam.sin();
            t[(cur + 1, cur)] = -rho * lam.sin();
            t[(cur + 1, cur + 1)] = rho * lam.cos();
            cur += 2;
        }
        if self.spec.level {
            t[(cur, cur)] = 1.0;
            if self.spec.slope {
                t[(cur, cur + 1)] = 1.0;
                t[(cur + 1, cur + 1)] = 1.0;
                cur += 1;
            }
            cur += 1;
        }
        if self.spec.seasonal {
            let s = self.seasonal_length() - 1;
            for j in 0..s {
                t[(cur, cur + j)] = -1.0;
            }
            for j in 1..s {
                t[(cur + j, cur + j - 1)] = 1.0;
            }
        }
        t
    }

    /// Measurement vector `Z` (`y_t = Z' x_t`).
    pub fn measurement(&self) -> DVector<Real> {
        let mut z = DVector::zeros(self.state_dim());
        let mut cur = 0;
        if self.spec.noise {
            z[cur] = 1.0;
            cur += 1;
        }
        if self.spec.cycle {
            z[cur] = 1.0;
            cur += 2;
        }
        if self.spec.level {
            z[cur] = 1.0;
            cur += 1;
            if self.spec.slope {
                cur += 1;
            }
        }
        if self.spec.seasonal {
            z[cur] = 1.0;
        }
        z
    }

    /// Innovation covariance `Q` of the state disturbances.
    pub fn innovation_cov(&self) -> DMatrix<Real> {
        let m = self.state_dim();
        let mut q = DMatrix::zeros(m, m);
        let mut cur = 0;
        if self.spec.noise {
            q[(cur, cur)] = self.var_noise;
            cur += 1;
        }
        if self.spec.cycle {
            q[(cur, cur)] = self.var_cycle;
            q[(cur + 1, cur + 1)] = self.var_cycle;
            cur += 2;
        }
        if self.spec.level {
            q[(cur, cur)] = self.var_level;
            cur += 1;
            if self.spec.slope {
                q[(cur, cur)] = self.var_slope;
                cur += 1;
            }
        }
        if self.spec.seasonal {
            q[(cur, cur)] = self.var_seasonal;
        }
        q
    }

    /// Initial state mean and covariance.
    ///
    /// Stationary blocks (noise, cycle) get their unconditional variance;
    /// nonstationary blocks get the large-kappa diffuse prior.
    pub fn initial_state(&self) -> (DVector<Real>, DMatrix<Real>) {
        let m = self.state_dim();
        let a0 = DVector::zeros(m);
        let mut p0 = DMatrix::zeros(m, m);
        let mut cur = 0;
        if self.spec.noise {
            p0[(cur, cur)] = self.var_noise;
            cur += 1;
        }
        if self.spec.cycle {
            let v = self.var_cycle / (1.0 - self.cycle_rho * self.cycle_rho);
            p0[(cur, cur)] = v;
            p0[(cur + 1, cur + 1)] = v;
            cur += 2;
        }
        for _ in cur..m {
            p0[(cur, cur)] = DIFFUSE_KAPPA;
            cur += 1;
        }
        (a0, p0)
    }

    /// Number of diffuse state elements (excluded from the likelihood
    /// burn-in).
    pub fn diffuse_dim(&self) -> usize {
        let mut dim = 0;
        if self.spec.level {
            dim += 1;
        }
        if self.spec.slope {
            dim += 1;
        }
        if self.spec.seasonal {
            dim += self.seasonal_length() - 1;
        }
        dim
    }

    // ── Reduced form ─────────────────────────────────────────────────────

    /// Collapse the structural components into their canonical reduced
    /// (UCARIMA) form.
    ///
    /// Component order in the reduced model: noise, cycle, trend (level
    /// and slope merged), seasonal — present components only.  The slope
    /// has no standalone ARIMA form; it enters the trend's moving-average
    /// side.
    pub fn reduced_model(&self) -> UcarimaModel {
        let mut components = Vec::new();
        if self.spec.noise {
            components.push(ArimaModel::white_noise(self.var_noise));
        }
        if self.spec.cycle {
            let (rho, lam) = (self.cycle_rho, self.cycle_lambda());
            let ar = vec![1.0, -2.0 * rho * lam.cos(), rho * rho];
            let g0 = self.var_cycle * (1.0 + rho * rho);
            let g1 = -self.var_cycle * rho * lam.cos();
            let (ma, var) = factorize_ma(&[g0, g1]);
            components.push(ArimaModel::from_parts(ar, vec![1.0], ma, var));
        }
        if self.spec.level {
            let trend = if self.spec.slope {
                // (1-B)² m_t = (1-B) w_level + B w_slope
                let g0 = 2.0 * self.var_level + self.var_slope;
                let g1 = -self.var_level;
                let (ma, var) = factorize_ma(&[g0, g1]);
                ArimaModel::from_parts(vec![1.0], vec![1.0, -2.0, 1.0], ma, var)
            } else {
                ArimaModel::from_parts(vec![1.0], vec![1.0, -1.0], vec![1.0], self.var_level)
            };
            components.push(trend);
        }
        if self.spec.seasonal {
            let diff = vec![1.0; self.seasonal_length()];
            components.push(ArimaModel::from_parts(
                vec![1.0],
                diff,
                vec![1.0],
                self.var_seasonal,
            ));
        }
        UcarimaModel::new(components)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_layout() {
        let model =
            BasicStructuralModel::new(BsmSpec::default(), TsFrequency::Monthly).unwrap();
        // noise(1) + level(1) + slope(1) + seasonal(11)
        assert_eq!(model.state_dim(), 14);
        assert_eq!(model.cmp_positions(), vec![0, 1, 2, 3]);
        assert_eq!(model.spec().n_components(), 4);
    }

    #[test]
    fn cycle_layout() {
        let spec = BsmSpec {
            noise: true,
            cycle: true,
            level: true,
            slope: false,
            seasonal: true,
        };
        let model = BasicStructuralModel::new(spec, TsFrequency::Quarterly).unwrap();
        // noise(1) + cycle(2) + level(1) + seasonal(3)
        assert_eq!(model.state_dim(), 7);
        assert_eq!(model.cmp_positions(), vec![0, 1, 3, 4]);
        assert_eq!(model.diffuse_dim(), 4);
    }

    #[test]
    fn slope_without_level_rejected() {
        let spec = BsmSpec {
            noise: true,
            cycle: false,
            level: false,
            slope: true,
            seasonal: false,
        };
        assert!(BasicStructuralModel::new(spec, TsFrequency::Monthly).is_err());
    }

    #[test]
    fn seasonal_needs_subannual_frequency() {
        let spec = BsmSpec::default();
        assert!(BasicStructuralModel::new(spec, TsFrequency::Yearly).is_err());
    }

    #[test]
    fn measurement_picks_component_heads() {
        let model =
            BasicStructuralModel::new(BsmSpec::default(), TsFrequency::Quarterly).unwrap();
        let z = model.measurement();
        // noise, level, seasonal head = 1; slope and trailing seasonal = 0
        assert_eq!(z.as_slice(), &[1.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn variance_setters() {
        let mut model =
            BasicStructuralModel::new(BsmSpec::default(), TsFrequency::Monthly).unwrap();
        model.set_variance(Component::Level, 0.5).unwrap();
        assert_eq!(model.variance(Component::Level), 0.5);
        assert!(model.set_variance(Component::Cycle, 0.5).is_err());
        assert!(model.set_variance(Component::Noise, -1.0).is_err());
    }

    #[test]
    fn reduced_model_component_count() {
        let model =
            BasicStructuralModel::new(BsmSpec::default(), TsFrequency::Quarterly).unwrap();
        // noise + trend + seasonal
        assert_eq!(model.reduced_model().n_components(), 3);
    }
}
