//! Observation containers consumed by the filter and smoother.
//!
//! `SsfData` wraps a raw observation vector where `NaN` marks a missing
//! value; `ExtendedSsfData` appends a missing forecast tail so that a
//! single smoothing pass covers history and forecasts jointly.

use sts_core::{Real, TsData};

/// Raw observations for a state-space run.
#[derive(Debug, Clone)]
pub struct SsfData {
    values: Vec<Real>,
}

impl SsfData {
    /// Wrap an observation vector (`NaN` = missing).
    pub fn new(values: Vec<Real>) -> Self {
        Self { values }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation at time `t`.
    pub fn get(&self, t: usize) -> Real {
        self.values[t]
    }

    /// Whether the observation at time `t` is missing.
    pub fn is_missing(&self, t: usize) -> bool {
        self.values[t].is_nan()
    }
}

impl From<&TsData> for SsfData {
    fn from(series: &TsData) -> Self {
        Self::new(series.values().to_vec())
    }
}

/// Observations extended with a tail of missing values.
///
/// The smoother treats the tail as ordinary missing observations, which
/// turns its state estimates over the tail into multi-step forecasts.
#[derive(Debug, Clone)]
pub struct ExtendedSsfData {
    data: SsfData,
    forecasts: usize,
}

impl ExtendedSsfData {
    /// Extend `data` with `forecasts` missing values.
    pub fn new(data: SsfData, forecasts: usize) -> Self {
        Self { data, forecasts }
    }

    /// Total length, history plus forecast tail.
    pub fn len(&self) -> usize {
        self.data.len() + self.forecasts
    }

    /// Whether history and tail are both empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the observed history.
    pub fn observed_len(&self) -> usize {
        self.data.len()
    }

    /// Length of the forecast tail.
    pub fn forecasts_count(&self) -> usize {
        self.forecasts
    }

    /// Observation at time `t` (`NaN` over the forecast tail).
    pub fn get(&self, t: usize) -> Real {
        if t < self.data.len() {
            self.data.get(t)
        } else {
            Real::NAN
        }
    }

    /// Whether the observation at time `t` is missing.
    pub fn is_missing(&self, t: usize) -> bool {
        self.get(t).is_nan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_tail_is_missing() {
        let data = ExtendedSsfData::new(SsfData::new(vec![1.0, 2.0, Real::NAN]), 2);
        assert_eq!(data.len(), 5);
        assert_eq!(data.observed_len(), 3);
        assert!(!data.is_missing(0));
        assert!(data.is_missing(2));
        assert!(data.is_missing(3));
        assert!(data.is_missing(4));
    }
}
