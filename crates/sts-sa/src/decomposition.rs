//! Series decompositions: the labelled set of output series produced by a
//! seasonal adjustment, addressable by component type and by value vs.
//! forecast.

use std::collections::BTreeMap;

use sts_core::TsData;

/// How the components combine in natural space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecompositionMode {
    /// Components add up.
    Additive,
    /// Components multiply (sum in log space).
    Multiplicative,
}

/// Role of a series inside a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentType {
    /// The observed series itself.
    Series,
    /// Trend (level plus cycle).
    Trend,
    /// Seasonal component.
    Seasonal,
    /// Series minus seasonal.
    SeasonallyAdjusted,
    /// Irregular component.
    Irregular,
}

/// Whether an entry covers the observed span or the forecast extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentInformation {
    /// In-sample values.
    Value,
    /// Forecast values.
    Forecast,
}

/// A labelled collection of decomposition output series.
#[derive(Debug, Clone)]
pub struct SeriesDecomposition {
    mode: DecompositionMode,
    entries: BTreeMap<(ComponentType, ComponentInformation), TsData>,
}

impl SeriesDecomposition {
    /// Create an empty decomposition.
    pub fn new(mode: DecompositionMode) -> Self {
        Self {
            mode,
            entries: BTreeMap::new(),
        }
    }

    /// The combination mode of this decomposition.
    pub fn mode(&self) -> DecompositionMode {
        self.mode
    }

    /// Insert or replace an entry.
    pub fn add(
        &mut self,
        series: TsData,
        component: ComponentType,
        info: ComponentInformation,
    ) {
        self.entries.insert((component, info), series);
    }

    /// Look up an entry.
    pub fn series(
        &self,
        component: ComponentType,
        info: ComponentInformation,
    ) -> Option<&TsData> {
        self.entries.get(&(component, info))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
