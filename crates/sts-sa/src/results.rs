//! `StsResults` — the decomposition of a series into structural
//! components, with reconciled aggregates, forecast extensions, lazily
//! cached reduced-form objects, and the name-based retrieval protocol.
//!
//! Construction runs the smoother once over the observed series extended
//! with one seasonal cycle of missing values, extracts each declared
//! component from its state position, reconciles the aggregates (the
//! in-sample total is overwritten with the observed values), and stores
//! the raw components in the information set under `"model"`.  When the
//! decomposition is multiplicative, every internal series lives in log
//! space and is exponentiated at the retrieval boundary.

use std::sync::{Arc, LazyLock, OnceLock};

use sts_core::errors::{Error, Result};
use sts_core::information::STR_SEP;
use sts_core::{
    ensure, Information, InformationKind, InformationSet, Real, TsData, TsDomain,
};
use sts_ssf::{
    BasicStructuralModel, BsmFit, DiffuseLikelihood, ExtendedSsfData, Smoother, SsfData,
    UcarimaModel, WienerKolmogorovEstimators,
};

use crate::decomposition::{
    ComponentInformation, ComponentType, DecompositionMode, SeriesDecomposition,
};
use crate::mapper::InformationMapper;

/// Name of the sub-set holding the raw model components.
pub const MODEL: &str = "model";
/// Raw observed series key inside the model sub-set.
pub const SERIES: &str = "series";
/// Raw level key.
pub const LEVEL: &str = "level";
/// Raw cycle key.
pub const CYCLE: &str = "cycle";
/// Raw slope key.
pub const SLOPE: &str = "slope";
/// Raw noise key.
pub const NOISE: &str = "noise";
/// Raw seasonal key.
pub const SEASONAL: &str = "seasonal";

/// Suffix marking the forecast segment of a named series.
pub const F_SUFFIX: &str = "_f";

/// Observed series, natural space.
pub const Y_CMP: &str = "y";
/// Trend, natural space, observed domain.
pub const T_CMP: &str = "t";
/// Seasonally adjusted series, natural space, observed domain.
pub const SA_CMP: &str = "sa";
/// Seasonal component, natural space, observed domain.
pub const S_CMP: &str = "s";
/// Irregular component, natural space, observed domain.
pub const I_CMP: &str = "i";
/// Seasonal plus irregular, natural space.
pub const SI_CMP: &str = "si";
/// Observed series, log (pre-transform) space.
pub const Y_LIN: &str = "y_lin";
/// Trend, log space, observed domain.
pub const T_LIN: &str = "t_lin";
/// Seasonally adjusted series, log space, observed domain.
pub const SA_LIN: &str = "sa_lin";
/// Seasonal component, log space, observed domain.
pub const S_LIN: &str = "s_lin";
/// Irregular component, log space, observed domain.
pub const I_LIN: &str = "i_lin";
/// Standardized one-step residuals.
pub const RESIDUALS: &str = "residuals";

/// Results of a structural seasonal adjustment.
///
/// All component series are computed once at construction and immutable
/// thereafter; the reduced model and its estimators are computed on first
/// access.  Instances are safe to share across threads.
pub struct StsResults {
    y: TsData,
    yf: TsData,
    t: TsData,
    sa: TsData,
    s: TsData,
    i: TsData,
    c: TsData,
    info: InformationSet,
    mul: bool,
    fit: BsmFit,
    reduced: OnceLock<(UcarimaModel, Real)>,
    wk: OnceLock<WienerKolmogorovEstimators>,
    mapper: Arc<InformationMapper<StsResults>>,
}

impl StsResults {
    /// Decompose `y` with the fitted model, resolving names against the
    /// process-wide registry.
    ///
    /// When `mul` is true, `y` must already be in log space; every
    /// natural-space retrieval exponentiates on the way out.
    pub fn new(y: TsData, fit: BsmFit, mul: bool) -> Result<Self> {
        Self::with_mapper(y, fit, mul, Arc::clone(Self::default_mapper()))
    }

    /// Decompose `y`, resolving names against an explicitly injected
    /// registry.
    pub fn with_mapper(
        y: TsData,
        fit: BsmFit,
        mul: bool,
        mapper: Arc<InformationMapper<StsResults>>,
    ) -> Result<Self> {
        ensure!(!y.is_empty(), "cannot decompose an empty series");
        let model = fit.model();
        ensure!(
            y.frequency() == model.frequency(),
            "series frequency {} does not match the model frequency {}",
            y.frequency(),
            model.frequency()
        );
        let spec = model.spec();
        let positions = model.cmp_positions();
        if positions.len() != spec.n_components() {
            return Err(Error::Configuration(format!(
                "{} state positions supplied for {} declared components",
                positions.len(),
                spec.n_components()
            )));
        }

        // One smoothing pass over history plus one seasonal cycle of
        // missing values covers in-sample estimates and forecasts jointly.
        let horizon = model.seasonal_length();
        let data = ExtendedSsfData::new(SsfData::from(&y), horizon);
        let smoothed = Smoother::new(model).process(&data)?;

        let start = y.start();
        let dom = y.domain();
        let mut info = InformationSet::new();
        let mut cur = 0usize;
        let mut noise = None;
        let mut cycle = None;
        let mut level = None;
        let mut seasonal = None;
        {
            let minfo = info.sub_set(MODEL);
            if spec.noise {
                let srs = TsData::new(start, smoothed.component(positions[cur]));
                cur += 1;
                minfo.add(NOISE, Information::Series(srs.clone()));
                noise = Some(srs);
            }
            if spec.cycle {
                let srs = TsData::new(start, smoothed.component(positions[cur]));
                cur += 1;
                minfo.add(CYCLE, Information::Series(srs.clone()));
                cycle = Some(srs);
            }
            if spec.level {
                let srs = TsData::new(start, smoothed.component(positions[cur]));
                cur += 1;
                minfo.add(LEVEL, Information::Series(srs.clone()));
                level = Some(srs);
                if spec.slope {
                    let srs = TsData::new(start, smoothed.component(positions[cur]));
                    cur += 1;
                    minfo.add(SLOPE, Information::Series(srs));
                }
            }
            if spec.seasonal {
                let srs = TsData::new(start, smoothed.component(positions[cur]));
                minfo.add(SEASONAL, Information::Series(srs.clone()));
                seasonal = Some(srs);
            }
            minfo.add(SERIES, Information::Series(y.clone()));
        }

        // Absent components default to zero over the observed domain;
        // slope is not separately reconciled (it only drives the level).
        let i = noise.unwrap_or_else(|| TsData::constant(&dom, 0.0));
        let c = cycle
            .clone()
            .unwrap_or_else(|| TsData::constant(&dom, 0.0));
        let t = match (&level, &cycle) {
            (Some(l), Some(cy)) => l.plus(cy)?,
            (Some(l), None) => l.clone(),
            (None, _) => c.clone(),
        };
        let s = seasonal
            .clone()
            .unwrap_or_else(|| TsData::constant(&dom, 0.0));

        let mut total = t.plus(&s)?;
        total = total.plus(&i)?;
        // In-sample total is the observed series itself; the tail keeps
        // the model-implied values.
        total = total.update(&y)?;
        let sa = match &seasonal {
            Some(raw) => total.minus(raw)?,
            None => total.clone(),
        };
        let yf = total.drop(y.len(), 0);

        Ok(Self {
            y,
            yf,
            t,
            sa,
            s,
            i,
            c,
            info,
            mul,
            fit,
            reduced: OnceLock::new(),
            wk: OnceLock::new(),
            mapper,
        })
    }

    // ── Direct accessors ─────────────────────────────────────────────────

    /// The observed series (log space when multiplicative).
    pub fn series(&self) -> &TsData {
        &self.y
    }

    /// Model-implied forecasts of the series.
    pub fn forecasts(&self) -> &TsData {
        &self.yf
    }

    /// Trend over the extended domain.
    pub fn trend(&self) -> &TsData {
        &self.t
    }

    /// Seasonal component (zero over the observed domain when absent).
    pub fn seasonal(&self) -> &TsData {
        &self.s
    }

    /// Irregular component (zero over the observed domain when absent).
    pub fn irregular(&self) -> &TsData {
        &self.i
    }

    /// Cycle component (zero over the observed domain when absent).
    pub fn cycle(&self) -> &TsData {
        &self.c
    }

    /// Seasonally adjusted series over the extended domain.
    pub fn seasonally_adjusted(&self) -> &TsData {
        &self.sa
    }

    /// Whether the decomposition is multiplicative.
    pub fn is_multiplicative(&self) -> bool {
        self.mul
    }

    /// The hierarchical metadata container.
    pub fn information(&self) -> &InformationSet {
        &self.info
    }

    /// The fitted model.
    pub fn model(&self) -> &BasicStructuralModel {
        self.fit.model()
    }

    /// The likelihood evaluated on the fitted series.
    pub fn likelihood(&self) -> &DiffuseLikelihood {
        self.fit.likelihood()
    }

    /// Standardized one-step residuals, aligned to the end of the
    /// observed domain.
    pub fn residuals(&self) -> TsData {
        let res = self.fit.likelihood().residuals();
        let start = self.y.start().plus((self.y.len() - res.len()) as i64);
        TsData::new(start, res.to_vec())
    }

    // ── Decompositions ───────────────────────────────────────────────────

    /// The additive decomposition over observed and forecast domains, in
    /// the internal (pre-transform) space.
    pub fn get_components(&self) -> Result<SeriesDecomposition> {
        self.decomposition(DecompositionMode::Additive, false)
    }

    /// The decomposition in natural space: additive as-is, multiplicative
    /// with every series exponentiated.
    pub fn series_decomposition(&self) -> Result<SeriesDecomposition> {
        if self.mul {
            self.decomposition(DecompositionMode::Multiplicative, true)
        } else {
            self.get_components()
        }
    }

    fn decomposition(
        &self,
        mode: DecompositionMode,
        exponentiate: bool,
    ) -> Result<SeriesDecomposition> {
        let dom = self.y.domain();
        let fdom = self.yf.domain();
        let out = |x: TsData| if exponentiate { x.exp() } else { x };
        let mut dec = SeriesDecomposition::new(mode);
        dec.add(
            out(self.y.clone()),
            ComponentType::Series,
            ComponentInformation::Value,
        );
        dec.add(
            out(self.sa.fit_to_domain(&dom)?),
            ComponentType::SeasonallyAdjusted,
            ComponentInformation::Value,
        );
        dec.add(
            out(self.t.fit_to_domain(&dom)?),
            ComponentType::Trend,
            ComponentInformation::Value,
        );
        dec.add(
            out(self.s.fit_to_domain(&dom)?),
            ComponentType::Seasonal,
            ComponentInformation::Value,
        );
        dec.add(
            out(self.i.fit_to_domain(&dom)?),
            ComponentType::Irregular,
            ComponentInformation::Value,
        );
        dec.add(
            out(self.yf.clone()),
            ComponentType::Series,
            ComponentInformation::Forecast,
        );
        dec.add(
            out(self.sa.fit_to_domain(&fdom)?),
            ComponentType::SeasonallyAdjusted,
            ComponentInformation::Forecast,
        );
        dec.add(
            out(self.t.fit_to_domain(&fdom)?),
            ComponentType::Trend,
            ComponentInformation::Forecast,
        );
        dec.add(
            out(self.s.fit_to_domain(&fdom)?),
            ComponentType::Seasonal,
            ComponentInformation::Forecast,
        );
        dec.add(
            out(self.i.fit_to_domain(&fdom)?),
            ComponentType::Irregular,
            ComponentInformation::Forecast,
        );
        Ok(dec)
    }

    // ── Name-based retrieval ─────────────────────────────────────────────

    /// Whether `id` resolves through the registry or, failing that,
    /// through the information set (deep search for plain names, exact
    /// path lookup for dotted ones).
    pub fn contains(&self, id: &str) -> bool {
        if self.mapper.contains(id) {
            return true;
        }
        if !id.contains(STR_SEP) {
            self.info.deep_search(id).is_some()
        } else {
            self.info.search(id).is_some()
        }
    }

    /// Resolve `id` to a value of the expected kind.
    ///
    /// A registered name always wins over the information set; its
    /// extraction runs against this instance.  Unregistered names fall
    /// through to the information set with the same deep-search vs.
    /// exact-path rule as [`contains`][Self::contains].
    pub fn get_data(&self, id: &str, expected: InformationKind) -> Result<Information> {
        if let Some(resolved) = self.mapper.get(self, id, expected) {
            return resolved;
        }
        let found = if !id.contains(STR_SEP) {
            self.info.deep_search(id)
        } else {
            self.info.search(id)
        };
        match found {
            Some(v) if v.kind() == expected => Ok(v.clone()),
            Some(v) => Err(Error::TypeMismatch {
                name: id.to_string(),
                expected: expected.name(),
                found: v.kind().name(),
            }),
            None => Err(Error::NameNotFound(id.to_string())),
        }
    }

    /// All registered names and their value kinds.
    pub fn dictionary(&self) -> Vec<(String, InformationKind)> {
        self.mapper.dictionary()
    }

    /// Dotted paths of every series stored in the information set.
    pub fn ts_data_dictionary(&self) -> Vec<String> {
        self.info.dictionary(InformationKind::Series)
    }

    // ── Lazily cached reduced-form objects ───────────────────────────────

    fn reduced(&self) -> &(UcarimaModel, Real) {
        self.reduced.get_or_init(|| {
            let mut ucm = self.fit.model().reduced_model();
            let factor = ucm.normalize();
            (ucm, factor)
        })
    }

    /// The normalized reduced (UCARIMA) form of the fitted model,
    /// computed on first access.
    pub fn ucarima_model(&self) -> &UcarimaModel {
        &self.reduced().0
    }

    /// Square root of the reduced model's normalization factor.
    pub fn residuals_scaling_factor(&self) -> Real {
        self.reduced().1.sqrt()
    }

    /// Wiener-Kolmogorov estimators over the reduced model, computed on
    /// first access.
    pub fn wiener_kolmogorov_estimators(&self) -> &WienerKolmogorovEstimators {
        self.wk
            .get_or_init(|| WienerKolmogorovEstimators::new(self.ucarima_model().clone()))
    }

    // ── Registry ─────────────────────────────────────────────────────────

    /// The process-wide registry, pre-populated with the standard
    /// dictionary.
    pub fn default_mapper() -> &'static Arc<InformationMapper<StsResults>> {
        static MAPPER: LazyLock<Arc<InformationMapper<StsResults>>> = LazyLock::new(|| {
            let mapper = InformationMapper::new();
            register_standard_mappings(&mapper);
            Arc::new(mapper)
        });
        &MAPPER
    }

    /// Register an additional named quantity on the process-wide
    /// registry.  Safe under concurrent reads.
    pub fn register_mapping<F>(name: &str, kind: InformationKind, extract: F)
    where
        F: Fn(&StsResults) -> Result<Information> + Send + Sync + 'static,
    {
        Self::default_mapper().register(name, kind, extract);
    }
}

fn natural(results: &StsResults, x: &TsData) -> Information {
    Information::Series(if results.mul { x.exp() } else { x.clone() })
}

fn fitted_natural(
    results: &StsResults,
    x: &TsData,
    dom: &TsDomain,
) -> Result<Information> {
    let fitted = x.fit_to_domain(dom)?;
    Ok(Information::Series(if results.mul {
        fitted.exp()
    } else {
        fitted
    }))
}

fn fitted_linear(x: &TsData, dom: &TsDomain) -> Result<Information> {
    Ok(Information::Series(x.fit_to_domain(dom)?))
}

/// Populate `mapper` with the standard dictionary: natural-space series,
/// their forecast segments, the log-space (`_lin`) counterparts, and the
/// residuals.
pub fn register_standard_mappings(mapper: &InformationMapper<StsResults>) {
    let series = InformationKind::Series;
    mapper.register(Y_CMP, series, |r| Ok(natural(r, &r.y)));
    mapper.register(&format!("{Y_CMP}{F_SUFFIX}"), series, |r| {
        Ok(natural(r, &r.yf))
    });
    mapper.register(T_CMP, series, |r| fitted_natural(r, &r.t, &r.y.domain()));
    mapper.register(&format!("{T_CMP}{F_SUFFIX}"), series, |r| {
        fitted_natural(r, &r.t, &r.yf.domain())
    });
    mapper.register(SA_CMP, series, |r| fitted_natural(r, &r.sa, &r.y.domain()));
    mapper.register(&format!("{SA_CMP}{F_SUFFIX}"), series, |r| {
        fitted_natural(r, &r.sa, &r.yf.domain())
    });
    mapper.register(S_CMP, series, |r| fitted_natural(r, &r.s, &r.y.domain()));
    mapper.register(&format!("{S_CMP}{F_SUFFIX}"), series, |r| {
        fitted_natural(r, &r.s, &r.yf.domain())
    });
    mapper.register(I_CMP, series, |r| fitted_natural(r, &r.i, &r.y.domain()));
    mapper.register(&format!("{I_CMP}{F_SUFFIX}"), series, |r| {
        fitted_natural(r, &r.i, &r.yf.domain())
    });
    mapper.register(SI_CMP, series, |r| {
        let si = r.s.plus(&r.i)?;
        Ok(natural(r, &si))
    });
    mapper.register(Y_LIN, series, |r| Ok(Information::Series(r.y.clone())));
    mapper.register(&format!("{Y_LIN}{F_SUFFIX}"), series, |r| {
        Ok(Information::Series(r.yf.clone()))
    });
    mapper.register(T_LIN, series, |r| fitted_linear(&r.t, &r.y.domain()));
    mapper.register(&format!("{T_LIN}{F_SUFFIX}"), series, |r| {
        fitted_linear(&r.t, &r.yf.domain())
    });
    mapper.register(SA_LIN, series, |r| fitted_linear(&r.sa, &r.y.domain()));
    mapper.register(&format!("{SA_LIN}{F_SUFFIX}"), series, |r| {
        fitted_linear(&r.sa, &r.yf.domain())
    });
    mapper.register(S_LIN, series, |r| fitted_linear(&r.s, &r.y.domain()));
    mapper.register(&format!("{S_LIN}{F_SUFFIX}"), series, |r| {
        fitted_linear(&r.s, &r.yf.domain())
    });
    mapper.register(I_LIN, series, |r| fitted_linear(&r.i, &r.y.domain()));
    mapper.register(&format!("{I_LIN}{F_SUFFIX}"), series, |r| {
        fitted_linear(&r.i, &r.yf.domain())
    });
    mapper.register(RESIDUALS, series, |r| {
        Ok(Information::Series(r.residuals()))
    });
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use sts_core::{TsFrequency, TsPeriod};
    use sts_ssf::{BsmSpec, Component};

    fn monthly_start() -> TsPeriod {
        TsPeriod::new(TsFrequency::Monthly, 2015, 0).unwrap()
    }

    fn monthly_series(n: usize) -> TsData {
        let values = (0..n)
            .map(|t| {
                let t = t as f64;
                20.0 + 0.05 * t
                    + 2.0 * (2.0 * std::f64::consts::PI * t / 12.0).sin()
                    + 0.3 * (t * 0.7).sin()
            })
            .collect();
        TsData::new(monthly_start(), values)
    }

    fn level_seasonal_noise_model() -> BasicStructuralModel {
        let spec = BsmSpec {
            noise: true,
            cycle: false,
            level: true,
            slope: false,
            seasonal: true,
        };
        let mut model = BasicStructuralModel::new(spec, TsFrequency::Monthly).unwrap();
        model.set_variance(Component::Level, 0.1).unwrap();
        model.set_variance(Component::Seasonal, 0.01).unwrap();
        model
    }

    fn results_for(y: TsData, model: BasicStructuralModel, mul: bool) -> StsResults {
        let fit = BsmFit::new(model, &y).unwrap();
        StsResults::new(y, fit, mul).unwrap()
    }

    fn expect_series(r: &StsResults, name: &str) -> TsData {
        r.get_data(name, InformationKind::Series)
            .unwrap()
            .as_series()
            .unwrap()
            .clone()
    }

    #[test]
    fn level_seasonal_noise_scenario() {
        let r = results_for(monthly_series(48), level_seasonal_noise_model(), false);
        let dec = r.get_components().unwrap();
        for ctype in [
            ComponentType::Trend,
            ComponentType::Seasonal,
            ComponentType::Irregular,
            ComponentType::SeasonallyAdjusted,
            ComponentType::Series,
        ] {
            assert_eq!(
                dec.series(ctype, ComponentInformation::Value).unwrap().len(),
                48
            );
            assert_eq!(
                dec.series(ctype, ComponentInformation::Forecast)
                    .unwrap()
                    .len(),
                12
            );
        }
        let trend = dec
            .series(ComponentType::Trend, ComponentInformation::Value)
            .unwrap();
        let level = expect_series(&r, "model.level");
        assert_eq!(trend, &level.fit_to_domain(&r.series().domain()).unwrap());
    }

    #[test]
    fn in_sample_total_equals_observed() {
        let y = monthly_series(48);
        let r = results_for(y.clone(), level_seasonal_noise_model(), false);
        let total = r
            .seasonally_adjusted()
            .plus(r.seasonal())
            .unwrap()
            .fit_to_domain(&y.domain())
            .unwrap();
        for (a, b) in total.values().iter().zip(y.values()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn sa_plus_seasonal_reconstructs_forecasts() {
        let r = results_for(monthly_series(48), level_seasonal_noise_model(), false);
        let sa_f = expect_series(&r, "sa_f");
        let s_f = expect_series(&r, "s_f");
        let y_f = expect_series(&r, "y_f");
        assert_eq!(sa_f.len(), 12);
        assert_eq!(y_f.start(), r.series().domain().end());
        let sum = sa_f.plus(&s_f).unwrap();
        for (a, b) in sum.values().iter().zip(y_f.values()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn trend_is_level_plus_cycle() {
        let spec = BsmSpec {
            noise: true,
            cycle: true,
            level: true,
            slope: false,
            seasonal: true,
        };
        let model = BasicStructuralModel::new(spec, TsFrequency::Quarterly).unwrap();
        let start = TsPeriod::new(TsFrequency::Quarterly, 2010, 0).unwrap();
        let y = TsData::new(
            start,
            (0..40).map(|t| 5.0 + 0.1 * t as f64 + (t as f64).cos()).collect(),
        );
        let r = results_for(y, model, false);
        let level = expect_series(&r, "model.level");
        let cycle = expect_series(&r, "model.cycle");
        assert_eq!(r.trend(), &level.plus(&cycle).unwrap());
    }

    #[test]
    fn absent_noise_defaults_to_zero_irregular() {
        let spec = BsmSpec {
            noise: false,
            cycle: false,
            level: true,
            slope: false,
            seasonal: true,
        };
        let model = BasicStructuralModel::new(spec, TsFrequency::Monthly).unwrap();
        let r = results_for(monthly_series(48), model, false);
        let irregular = expect_series(&r, I_CMP);
        assert_eq!(irregular.len(), 48);
        assert!(irregular.values().iter().all(|&v| v == 0.0));
        assert!(!r.contains("model.noise"));
    }

    #[test]
    fn multiplicative_names_are_exponentials_of_linear_names() {
        let y_natural = TsData::new(
            monthly_start(),
            (0..24)
                .map(|t| 50.0 + 3.0 * (t as f64 / 12.0 * 2.0 * std::f64::consts::PI).sin())
                .collect(),
        );
        let r = results_for(y_natural.log(), level_seasonal_noise_model(), true);
        for (name, lin) in [
            (Y_CMP, Y_LIN),
            (T_CMP, T_LIN),
            (SA_CMP, SA_LIN),
            (S_CMP, S_LIN),
            (I_CMP, I_LIN),
        ] {
            let nat = expect_series(&r, name);
            let lin = expect_series(&r, lin);
            for (a, b) in nat.values().iter().zip(lin.values()) {
                assert_abs_diff_eq!(*a, b.exp(), epsilon = 1e-9 * a.abs().max(1.0));
            }
        }
    }

    #[test]
    fn additive_names_match_linear_names() {
        let r = results_for(monthly_series(36), level_seasonal_noise_model(), false);
        assert_eq!(expect_series(&r, T_CMP), expect_series(&r, T_LIN));
        assert_eq!(expect_series(&r, Y_CMP), expect_series(&r, Y_LIN));
    }

    #[test]
    fn registered_names_win_over_the_information_set() {
        let mapper = Arc::new(InformationMapper::new());
        register_standard_mappings(&mapper);
        mapper.register(LEVEL, InformationKind::Real, |_| {
            Ok(Information::Real(42.0))
        });
        let y = monthly_series(48);
        let fit = BsmFit::new(level_seasonal_noise_model(), &y).unwrap();
        let r = StsResults::with_mapper(y, fit, false, mapper).unwrap();
        // "level" is both registered and stored under "model"; the
        // registered extraction wins.
        let got = r.get_data(LEVEL, InformationKind::Real).unwrap();
        assert_eq!(got.as_real(), Some(42.0));
        // and it wins for contains() too, trivially
        assert!(r.contains(LEVEL));
        // the registered kind is authoritative: no fallback on mismatch
        assert!(matches!(
            r.get_data(LEVEL, InformationKind::Series),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn two_tier_resolution() {
        let r = results_for(monthly_series(48), level_seasonal_noise_model(), false);
        // exact path
        assert!(r.contains("model.seasonal"));
        assert!(r
            .get_data("model.seasonal", InformationKind::Series)
            .is_ok());
        // deep search without separators
        assert!(r.contains("seasonal"));
        assert!(r.get_data("seasonal", InformationKind::Series).is_ok());
        // failures
        assert!(matches!(
            r.get_data("nonsense", InformationKind::Series),
            Err(Error::NameNotFound(_))
        ));
        assert!(matches!(
            r.get_data("model.seasonal", InformationKind::Real),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(!r.contains("model.nonsense"));
    }

    #[test]
    fn dictionary_lists_standard_names() {
        let r = results_for(monthly_series(48), level_seasonal_noise_model(), false);
        let names: Vec<String> = r.dictionary().into_iter().map(|(n, _)| n).collect();
        for expected in [Y_CMP, "y_f", T_CMP, SA_CMP, S_CMP, I_CMP, SI_CMP, Y_LIN, RESIDUALS] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        let ts_names = r.ts_data_dictionary();
        assert!(ts_names.contains(&"model.level".to_string()));
        assert!(ts_names.contains(&"model.series".to_string()));
    }

    #[test]
    fn residuals_align_to_the_end_of_the_sample() {
        let y = monthly_series(48);
        let r = results_for(y.clone(), level_seasonal_noise_model(), false);
        let res = r.residuals();
        assert_eq!(res.len(), 48 - r.model().diffuse_dim());
        assert_eq!(res.domain().end(), y.domain().end());
        let via_registry = expect_series(&r, RESIDUALS);
        assert_eq!(res, via_registry);
    }

    #[test]
    fn reduced_model_is_cached_and_consistent_across_threads() {
        let r = std::sync::Arc::new(results_for(
            monthly_series(48),
            level_seasonal_noise_model(),
            false,
        ));
        let mut collected: Vec<(Vec<f64>, f64)> = Vec::new();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let r = std::sync::Arc::clone(&r);
                    scope.spawn(move || {
                        let ucm = r.ucarima_model();
                        let vars = ucm
                            .components()
                            .iter()
                            .map(|c| c.innovation_variance())
                            .collect::<Vec<_>>();
                        (vars, r.residuals_scaling_factor())
                    })
                })
                .collect();
            for h in handles {
                collected.push(h.join().unwrap());
            }
        });
        for pair in collected.windows(2) {
            assert_eq!(pair[0], pair[1]);
        }
        assert!(collected[0].1 > 0.0);
        // the estimator object is derived from the same cached model
        let wk = r.wiener_kolmogorov_estimators();
        assert_eq!(wk.ucarima_model(), r.ucarima_model());
    }

    #[test]
    fn series_decomposition_modes() {
        let r = results_for(monthly_series(36), level_seasonal_noise_model(), false);
        assert_eq!(
            r.series_decomposition().unwrap().mode(),
            DecompositionMode::Additive
        );

        let y_natural = TsData::new(monthly_start(), vec![50.0; 36]);
        let rm = results_for(y_natural.log(), level_seasonal_noise_model(), true);
        let dec = rm.series_decomposition().unwrap();
        assert_eq!(dec.mode(), DecompositionMode::Multiplicative);
        let series = dec
            .series(ComponentType::Series, ComponentInformation::Value)
            .unwrap();
        for v in series.values() {
            assert_abs_diff_eq!(*v, 50.0, epsilon = 1e-9);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn reconciliation_overwrite_holds_for_random_series(
            values in prop::collection::vec(1.0f64..100.0, 24..40),
        ) {
            let y = TsData::new(monthly_start(), values);
            let r = results_for(y.clone(), level_seasonal_noise_model(), false);
            let total = r
                .seasonally_adjusted()
                .plus(r.seasonal())
                .unwrap()
                .fit_to_domain(&y.domain())
                .unwrap();
            for (a, b) in total.values().iter().zip(y.values()) {
                prop_assert!((a - b).abs() <= 1e-8 * b.abs().max(1.0));
            }
        }
    }
}
