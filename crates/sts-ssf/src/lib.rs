//! # sts-ssf
//!
//! State-space machinery for sts-rs: the basic structural model and its
//! state-space form, observation containers with a missing forecast tail,
//! the Kalman filter/smoother, the diffuse likelihood, and the reduced
//! (UCARIMA) form with its Wiener-Kolmogorov estimators.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// ARIMA polynomials, autocovariances, and spectral factorization.
pub mod arima;

/// Observation containers for filtering and smoothing.
pub mod data;

/// Diffuse likelihood and the `BsmFit` handle.
pub mod likelihood;

/// Basic structural model and its state-space form.
pub mod model;

/// Kalman filter and fixed-interval smoother.
pub mod smoother;

/// UCARIMA reduced models and normalization.
pub mod ucarima;

/// Wiener-Kolmogorov signal-extraction estimators.
pub mod wk;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use arima::ArimaModel;
pub use data::{ExtendedSsfData, SsfData};
pub use likelihood::{BsmFit, DiffuseLikelihood};
pub use model::{BasicStructuralModel, BsmSpec, Component};
pub use smoother::{Smoother, SmoothingResults};
pub use ucarima::UcarimaModel;
pub use wk::WienerKolmogorovEstimators;
