//! # sts
//!
//! Structural time-series decomposition and seasonal adjustment.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `sts-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! sts = "0.1"
//! ```
//!
//! ```rust
//! use sts::core::{TsData, TsFrequency, TsPeriod};
//! use sts::sa::StsResults;
//! use sts::ssf::{BasicStructuralModel, BsmFit, BsmSpec};
//!
//! let start = TsPeriod::new(TsFrequency::Quarterly, 2020, 0).unwrap();
//! let y = TsData::new(start, (0..24).map(|t| 10.0 + 0.1 * t as f64).collect());
//! let model = BasicStructuralModel::new(BsmSpec::default(), TsFrequency::Quarterly).unwrap();
//! let fit = BsmFit::new(model, &y).unwrap();
//! let results = StsResults::new(y, fit, false).unwrap();
//! assert_eq!(results.forecasts().len(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types: time series, periods, errors, and the information set.
pub use sts_core as core;

/// State-space machinery: the structural model, filter/smoother,
/// likelihood, and reduced forms.
pub use sts_ssf as ssf;

/// Seasonal-adjustment results and the named-quantity registry.
pub use sts_sa as sa;
