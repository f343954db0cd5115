//! `TsFrequency` — annual frequency of a regular time series.

/// Observation frequency of an equally-spaced series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsFrequency {
    /// One observation per year.
    Yearly = 1,
    /// Two observations per year.
    HalfYearly = 2,
    /// Four observations per year.
    Quarterly = 4,
    /// Six observations per year.
    Bimonthly = 6,
    /// Twelve observations per year.
    Monthly = 12,
}

impl TsFrequency {
    /// Number of periods per year.
    pub fn periods_per_year(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for TsFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TsFrequency::Yearly => "Yearly",
            TsFrequency::HalfYearly => "Half-Yearly",
            TsFrequency::Quarterly => "Quarterly",
            TsFrequency::Bimonthly => "Bimonthly",
            TsFrequency::Monthly => "Monthly",
        };
        write!(f, "{s}")
    }
}
