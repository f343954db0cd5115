//! `TsData` — an immutable, frequency-tagged, contiguous series of reals.
//!
//! Missing values are represented by `NaN`.  Elementwise combination
//! (`plus`, `minus`) works over the intersection of the two domains;
//! `update` spans the union with the argument overwriting the receiver.

use crate::errors::{Error, Result};
use crate::frequency::TsFrequency;
use crate::period::{TsDomain, TsPeriod};
use crate::Real;

/// A contiguous, equally-spaced series of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct TsData {
    start: TsPeriod,
    values: Vec<Real>,
}

impl TsData {
    /// Create a series from its first period and its observations.
    pub fn new(start: TsPeriod, values: Vec<Real>) -> Self {
        Self { start, values }
    }

    /// Create a series holding `value` at every period of `domain`.
    pub fn constant(domain: &TsDomain, value: Real) -> Self {
        Self {
            start: domain.start(),
            values: vec![value; domain.len()],
        }
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// First period of the series.
    pub fn start(&self) -> TsPeriod {
        self.start
    }

    /// Frequency of the underlying time axis.
    pub fn frequency(&self) -> TsFrequency {
        self.start.frequency()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The span covered by the series.
    pub fn domain(&self) -> TsDomain {
        TsDomain::new(self.start, self.values.len())
    }

    /// All observations, oldest first.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Observation at 0-based offset `i`.
    pub fn get(&self, i: usize) -> Real {
        self.values[i]
    }

    /// Observation at `period`, or `None` if outside the domain.
    pub fn value_at(&self, period: &TsPeriod) -> Option<Real> {
        self.domain().position_of(period).map(|i| self.values[i])
    }

    // ── Elementwise combination ──────────────────────────────────────────

    /// Elementwise sum over the intersection of the two domains.
    pub fn plus(&self, other: &TsData) -> Result<TsData> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference over the intersection of the two domains.
    pub fn minus(&self, other: &TsData) -> Result<TsData> {
        self.zip_with(other, |a, b| a - b)
    }

    fn zip_with(&self, other: &TsData, op: impl Fn(Real, Real) -> Real) -> Result<TsData> {
        let dom = self.domain().intersection(&other.domain())?;
        if dom.is_empty() {
            return Err(Error::DomainMismatch(format!(
                "disjoint domains: {} and {}",
                self.domain(),
                other.domain()
            )));
        }
        let off_a = (dom.start().id() - self.start.id()) as usize;
        let off_b = (dom.start().id() - other.start.id()) as usize;
        let values = (0..dom.len())
            .map(|i| op(self.values[off_a + i], other.values[off_b + i]))
            .collect();
        Ok(TsData::new(dom.start(), values))
    }

    /// Overwrite with `other` over its domain, keeping this series'
    /// values elsewhere.  The result spans the union of the two domains,
    /// padded with missing values where neither operand is defined.
    pub fn update(&self, other: &TsData) -> Result<TsData> {
        let dom = self.domain().union(&other.domain())?;
        let mut values = vec![Real::NAN; dom.len()];
        let off_self = (self.start.id() - dom.start().id()) as usize;
        values[off_self..off_self + self.len()].copy_from_slice(&self.values);
        let off_other = (other.start.id() - dom.start().id()) as usize;
        values[off_other..off_other + other.len()].copy_from_slice(&other.values);
        Ok(TsData::new(dom.start(), values))
    }

    // ── Domain manipulation ──────────────────────────────────────────────

    /// Remove `n_begin` observations from the front and `n_end` from the
    /// back.  Returns an empty series when nothing remains.
    pub fn drop(&self, n_begin: usize, n_end: usize) -> TsData {
        if n_begin + n_end >= self.len() {
            return TsData::new(self.start.plus(n_begin as i64), Vec::new());
        }
        TsData::new(
            self.start.plus(n_begin as i64),
            self.values[n_begin..self.len() - n_end].to_vec(),
        )
    }

    /// Restrict the series to `domain`.
    ///
    /// The requested domain must be entirely contained in the series'
    /// own domain; fitting a series to its exact existing domain is the
    /// identity.  Out-of-range requests fail with
    /// [`Error::DomainMismatch`] rather than silently padding.
    pub fn fit_to_domain(&self, domain: &TsDomain) -> Result<TsData> {
        if !self.domain().encloses(domain) {
            return Err(Error::DomainMismatch(format!(
                "requested domain {} not contained in {}",
                domain,
                self.domain()
            )));
        }
        let off = (domain.start().id() - self.start.id()) as usize;
        Ok(TsData::new(
            domain.start(),
            self.values[off..off + domain.len()].to_vec(),
        ))
    }

    // ── Transforms ───────────────────────────────────────────────────────

    /// Elementwise exponential.
    pub fn exp(&self) -> TsData {
        TsData::new(self.start, self.values.iter().map(|v| v.exp()).collect())
    }

    /// Elementwise natural logarithm.
    pub fn log(&self) -> TsData {
        TsData::new(self.start, self.values.iter().map(|v| v.ln()).collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn start(year: i32) -> TsPeriod {
        TsPeriod::new(TsFrequency::Monthly, year, 0).unwrap()
    }

    #[test]
    fn plus_over_intersection() {
        let a = TsData::new(start(2000), vec![1.0; 24]);
        let b = TsData::new(start(2001), vec![2.0; 24]);
        let sum = a.plus(&b).unwrap();
        assert_eq!(sum.start(), start(2001));
        assert_eq!(sum.len(), 12);
        assert!(sum.values().iter().all(|&v| v == 3.0));
    }

    #[test]
    fn plus_disjoint_fails() {
        let a = TsData::new(start(2000), vec![1.0; 12]);
        let b = TsData::new(start(2010), vec![2.0; 12]);
        assert!(matches!(a.plus(&b), Err(Error::DomainMismatch(_))));
    }

    #[test]
    fn update_overwrites_overlap() {
        let a = TsData::new(start(2000), vec![1.0; 24]);
        let b = TsData::new(start(2000), vec![9.0; 12]);
        let u = a.update(&b).unwrap();
        assert_eq!(u.len(), 24);
        assert!(u.values()[..12].iter().all(|&v| v == 9.0));
        assert!(u.values()[12..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn update_pads_gap_with_missing() {
        let a = TsData::new(start(2000), vec![1.0; 6]);
        let b = TsData::new(start(2000).plus(12), vec![2.0; 6]);
        let u = a.update(&b).unwrap();
        assert_eq!(u.len(), 18);
        assert!(u.values()[6..12].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn drop_front_and_back() {
        let a = TsData::new(start(2000), (0..24).map(|i| i as f64).collect());
        let d = a.drop(12, 6);
        assert_eq!(d.start(), start(2001));
        assert_eq!(d.len(), 6);
        assert_eq!(d.get(0), 12.0);
        assert!(a.drop(20, 10).is_empty());
    }

    #[test]
    fn fit_to_sub_domain() {
        let a = TsData::new(start(2000), (0..24).map(|i| i as f64).collect());
        let dom = TsDomain::new(start(2001), 6);
        let f = a.fit_to_domain(&dom).unwrap();
        assert_eq!(f.values(), &[12.0, 13.0, 14.0, 15.0, 16.0, 17.0]);
    }

    #[test]
    fn fit_out_of_range_fails() {
        let a = TsData::new(start(2000), vec![0.0; 12]);
        let dom = TsDomain::new(start(2000).plus(6), 12);
        assert!(matches!(
            a.fit_to_domain(&dom),
            Err(Error::DomainMismatch(_))
        ));
    }

    #[test]
    fn exp_log_roundtrip() {
        let a = TsData::new(start(2000), vec![1.0, 2.5, 10.0]);
        let back = a.exp().log();
        for (x, y) in a.values().iter().zip(back.values()) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
    }

    proptest! {
        #[test]
        fn fit_to_own_domain_is_identity(values in prop::collection::vec(-1e6f64..1e6, 1..60)) {
            let a = TsData::new(start(2000), values);
            let f = a.fit_to_domain(&a.domain()).unwrap();
            prop_assert_eq!(a, f);
        }

        #[test]
        fn update_with_self_prefix_restores_values(
            values in prop::collection::vec(-1e6f64..1e6, 2..60),
            cut in 1usize..59,
        ) {
            let a = TsData::new(start(2000), values);
            let cut = cut.min(a.len() - 1);
            let head = a.drop(0, a.len() - cut);
            let u = a.update(&head).unwrap();
            prop_assert_eq!(u, a);
        }
    }
}
