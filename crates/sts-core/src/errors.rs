//! Error types for sts-rs.
//!
//! A single `thiserror`-derived enum covers the library's failure classes:
//! fatal configuration errors at construction time, domain mismatches when
//! fitting a series to a sub-domain, and name/type failures raised by the
//! dictionary lookup protocol.

use thiserror::Error;

/// The top-level error type used throughout sts-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Inconsistent model configuration detected at construction time.
    ///
    /// Fatal: no partially-constructed result is ever observable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A requested sub-domain cannot be represented from the source series.
    #[error("domain mismatch: {0}")]
    DomainMismatch(String),

    /// A name resolved neither through the registry nor through the
    /// information set.
    #[error("name not found: {0}")]
    NameNotFound(String),

    /// A resolved value's runtime type does not match the caller's
    /// expectation.  Values are never silently coerced.
    #[error("type mismatch for '{name}': expected {expected}, found {found}")]
    TypeMismatch {
        /// The name that was looked up.
        name: String,
        /// The type the caller asked for.
        expected: &'static str,
        /// The type of the stored value.
        found: &'static str,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout sts-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validate an argument precondition.
///
/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sts_core::{ensure, errors::Result};
/// fn positive(x: f64) -> Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}
