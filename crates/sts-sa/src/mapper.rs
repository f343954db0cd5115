//! `InformationMapper` — a shared, name-indexed table of extraction
//! functions over a result instance.
//!
//! The mapper stores behavior, not precomputed values: every lookup
//! re-invokes the registered closure against the supplied result.  All
//! reads and writes serialize on a single table-wide lock, so no partial
//! view of an in-progress registration can be observed.

use std::sync::Mutex;

use sts_core::errors::{Error, Result};
use sts_core::{Information, InformationKind};

type Extraction<R> = Box<dyn Fn(&R) -> Result<Information> + Send + Sync>;

struct Mapping<R> {
    kind: InformationKind,
    extract: Extraction<R>,
}

/// A name-to-extraction-function registry over results of type `R`.
///
/// Registration order is preserved for dictionary listings; registering
/// an existing name replaces its mapping.
pub struct InformationMapper<R> {
    entries: Mutex<Vec<(String, Mapping<R>)>>,
}

impl<R> InformationMapper<R> {
    /// Create an empty mapper.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, Mapping<R>)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `extract` under `name`, producing values of type `kind`.
    pub fn register<F>(&self, name: &str, kind: InformationKind, extract: F)
    where
        F: Fn(&R) -> Result<Information> + Send + Sync + 'static,
    {
        let mut entries = self.lock();
        let mapping = Mapping {
            kind,
            extract: Box::new(extract),
        };
        match entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = mapping,
            None => entries.push((name.to_string(), mapping)),
        }
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lock().iter().any(|(n, _)| n == name)
    }

    /// Invoke the extraction registered under `name` against `source`.
    ///
    /// Returns `None` when the name is not registered; a registered name
    /// whose declared kind differs from `expected` yields a
    /// [`Error::TypeMismatch`] without falling through.
    pub fn get(
        &self,
        source: &R,
        name: &str,
        expected: InformationKind,
    ) -> Option<Result<Information>> {
        let entries = self.lock();
        let (_, mapping) = entries.iter().find(|(n, _)| n == name)?;
        if mapping.kind != expected {
            return Some(Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: expected.name(),
                found: mapping.kind.name(),
            }));
        }
        Some((mapping.extract)(source))
    }

    /// All registered names with their value kinds, in registration order.
    pub fn dictionary(&self) -> Vec<(String, InformationKind)> {
        self.lock()
            .iter()
            .map(|(n, m)| (n.clone(), m.kind))
            .collect()
    }
}

impl<R> Default for InformationMapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
