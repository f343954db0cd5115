//! # sts-core
//!
//! Core types for sts-rs: the error hierarchy, the regular time axis
//! (`TsFrequency`, `TsPeriod`, `TsDomain`), the `TsData` series container,
//! and the hierarchical `InformationSet` metadata store.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// Observation frequencies.
pub mod frequency;

/// Hierarchical typed key/value store.
pub mod information;

/// Periods and domains on a regular time axis.
pub mod period;

/// Contiguous time-series container.
pub mod series;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use frequency::TsFrequency;
pub use information::{Information, InformationKind, InformationSet};
pub use period::{TsDomain, TsPeriod};
pub use series::TsData;
