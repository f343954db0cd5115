//! `TsPeriod` and `TsDomain` — positions and spans on a regular time axis.
//!
//! A period is identified by its frequency and an absolute index
//! (`year * frequency + position`), so period arithmetic is plain integer
//! arithmetic.  A domain is a contiguous run of periods given by its start
//! and length.

use crate::errors::{Error, Result};
use crate::frequency::TsFrequency;

/// A single period (e.g. one month, one quarter) on a regular time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TsPeriod {
    freq: TsFrequency,
    id: i64,
}

impl TsPeriod {
    /// Create a period from a calendar year and a 0-based position within
    /// the year.
    pub fn new(freq: TsFrequency, year: i32, position: usize) -> Result<Self> {
        crate::ensure!(
            position < freq.periods_per_year(),
            "position {position} out of range for {freq} frequency"
        );
        Ok(Self {
            freq,
            id: year as i64 * freq.periods_per_year() as i64 + position as i64,
        })
    }

    /// Create a period directly from its absolute index.
    pub fn from_id(freq: TsFrequency, id: i64) -> Self {
        Self { freq, id }
    }

    /// Frequency of the time axis this period lives on.
    pub fn frequency(&self) -> TsFrequency {
        self.freq
    }

    /// Absolute index (`year * frequency + position`).
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Calendar year of this period.
    pub fn year(&self) -> i32 {
        self.id.div_euclid(self.freq.periods_per_year() as i64) as i32
    }

    /// 0-based position within the year.
    pub fn position(&self) -> usize {
        self.id.rem_euclid(self.freq.periods_per_year() as i64) as usize
    }

    /// The period `n` steps later (`n` may be negative).
    pub fn plus(&self, n: i64) -> Self {
        Self {
            freq: self.freq,
            id: self.id + n,
        }
    }

    /// Number of periods from `other` to `self`.
    ///
    /// Fails if the two periods have different frequencies.
    pub fn minus(&self, other: &TsPeriod) -> Result<i64> {
        crate::ensure!(
            self.freq == other.freq,
            "cannot compare a {} period with a {} period",
            self.freq,
            other.freq
        );
        Ok(self.id - other.id)
    }
}

impl std::fmt::Display for TsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.freq {
            TsFrequency::Yearly => write!(f, "{}", self.year()),
            TsFrequency::Quarterly => write!(f, "{}Q{}", self.year(), self.position() + 1),
            _ => write!(f, "{}-{:02}", self.year(), self.position() + 1),
        }
    }
}

/// A contiguous span of periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TsDomain {
    start: TsPeriod,
    len: usize,
}

impl TsDomain {
    /// Create a domain from its first period and length.
    pub fn new(start: TsPeriod, len: usize) -> Self {
        Self { start, len }
    }

    /// First period of the domain.
    pub fn start(&self) -> TsPeriod {
        self.start
    }

    /// Number of periods in the domain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the domain contains no periods.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Frequency of the underlying time axis.
    pub fn frequency(&self) -> TsFrequency {
        self.start.frequency()
    }

    /// One past the last period of the domain.
    pub fn end(&self) -> TsPeriod {
        self.start.plus(self.len as i64)
    }

    /// Whether `period` falls inside the domain.
    pub fn contains(&self, period: &TsPeriod) -> bool {
        period.frequency() == self.frequency()
            && period.id() >= self.start.id()
            && period.id() < self.start.id() + self.len as i64
    }

    /// Whether `other` is entirely contained in this domain.
    pub fn encloses(&self, other: &TsDomain) -> bool {
        other.frequency() == self.frequency()
            && other.start.id() >= self.start.id()
            && other.end().id() <= self.end().id()
    }

    /// 0-based offset of `period` inside the domain, or `None` if outside.
    pub fn position_of(&self, period: &TsPeriod) -> Option<usize> {
        if self.contains(period) {
            Some((period.id() - self.start.id()) as usize)
        } else {
            None
        }
    }

    /// The common sub-span of two domains.
    ///
    /// Returns an empty domain when the spans do not overlap; fails on a
    /// frequency mismatch.
    pub fn intersection(&self, other: &TsDomain) -> Result<TsDomain> {
        self.check_frequency(other)?;
        let start = self.start.id().max(other.start.id());
        let end = self.end().id().min(other.end().id());
        let len = (end - start).max(0) as usize;
        Ok(TsDomain::new(
            TsPeriod::from_id(self.frequency(), start),
            len,
        ))
    }

    /// The smallest domain covering both operands.
    pub fn union(&self, other: &TsDomain) -> Result<TsDomain> {
        self.check_frequency(other)?;
        if self.is_empty() {
            return Ok(*other);
        }
        if other.is_empty() {
            return Ok(*self);
        }
        let start = self.start.id().min(other.start.id());
        let end = self.end().id().max(other.end().id());
        Ok(TsDomain::new(
            TsPeriod::from_id(self.frequency(), start),
            (end - start) as usize,
        ))
    }

    fn check_frequency(&self, other: &TsDomain) -> Result<()> {
        if self.frequency() != other.frequency() {
            return Err(Error::DomainMismatch(format!(
                "frequency mismatch: {} vs {}",
                self.frequency(),
                other.frequency()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for TsDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
