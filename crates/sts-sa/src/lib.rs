//! # sts-sa
//!
//! Seasonal-adjustment results for sts-rs: assembly of the smoothed
//! structural components into a reconciled decomposition, and the
//! name-based retrieval protocol over those results.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Decomposition containers addressed by component type.
pub mod decomposition;

/// The name-to-extraction-function registry.
pub mod mapper;

/// Structural decomposition results.
pub mod results;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use decomposition::{
    ComponentInformation, ComponentType, DecompositionMode, SeriesDecomposition,
};
pub use mapper::InformationMapper;
pub use results::{register_standard_mappings, StsResults};
