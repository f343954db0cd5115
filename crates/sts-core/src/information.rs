//! `InformationSet` — a hierarchical, name-indexed store of typed values.
//!
//! Values carry a runtime type tag ([`InformationKind`]) so that lookups
//! can be type-checked at the retrieval boundary instead of relying on
//! unchecked casts.  Nested sub-sets are addressed with dotted paths
//! (`"model.level"`); path-agnostic deep search scans every sub-set for a
//! leaf with the requested name.

use std::collections::BTreeMap;

use crate::series::TsData;
use crate::Real;

/// Path separator used in hierarchical lookups.
pub const STR_SEP: char = '.';

/// The runtime type of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformationKind {
    /// A time series.
    Series,
    /// A scalar.
    Real,
    /// A string.
    Text,
}

impl InformationKind {
    /// Stable name of the kind, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            InformationKind::Series => "series",
            InformationKind::Real => "real",
            InformationKind::Text => "text",
        }
    }
}

impl std::fmt::Display for InformationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored value together with its runtime type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Information {
    /// A time series.
    Series(TsData),
    /// A scalar.
    Real(Real),
    /// A string.
    Text(String),
}

impl Information {
    /// The runtime type of this value.
    pub fn kind(&self) -> InformationKind {
        match self {
            Information::Series(_) => InformationKind::Series,
            Information::Real(_) => InformationKind::Real,
            Information::Text(_) => InformationKind::Text,
        }
    }

    /// Borrow the contained series, if this value is one.
    pub fn as_series(&self) -> Option<&TsData> {
        match self {
            Information::Series(s) => Some(s),
            _ => None,
        }
    }

    /// The contained scalar, if this value is one.
    pub fn as_real(&self) -> Option<Real> {
        match self {
            Information::Real(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(Information),
    Set(InformationSet),
}

/// A nested, name-indexed container of [`Information`] values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InformationSet {
    items: BTreeMap<String, Node>,
}

impl InformationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get or create the sub-set named `name`.
    ///
    /// An existing leaf under the same name is replaced by the new sub-set.
    pub fn sub_set(&mut self, name: &str) -> &mut InformationSet {
        let node = self
            .items
            .entry(name.to_string())
            .or_insert_with(|| Node::Set(InformationSet::new()));
        if let Node::Leaf(_) = node {
            *node = Node::Set(InformationSet::new());
        }
        match node {
            Node::Set(set) => set,
            Node::Leaf(_) => unreachable!(),
        }
    }

    /// Store `value` under `name` in this set (no path resolution).
    pub fn add(&mut self, name: &str, value: Information) {
        self.items.insert(name.to_string(), Node::Leaf(value));
    }

    /// Store `value` at a dotted `path`, creating intermediate sub-sets.
    pub fn add_path(&mut self, path: &str, value: Information) {
        match path.split_once(STR_SEP) {
            None => self.add(path, value),
            Some((head, rest)) => self.sub_set(head).add_path(rest, value),
        }
    }

    /// Exact hierarchical lookup of a dotted `path`.
    pub fn search(&self, path: &str) -> Option<&Information> {
        match path.split_once(STR_SEP) {
            None => match self.items.get(path) {
                Some(Node::Leaf(v)) => Some(v),
                _ => None,
            },
            Some((head, rest)) => match self.items.get(head) {
                Some(Node::Set(set)) => set.search(rest),
                _ => None,
            },
        }
    }

    /// Path-agnostic search for a leaf named `name`, depth-first in key
    /// order; the first match wins.
    pub fn deep_search(&self, name: &str) -> Option<&Information> {
        if let Some(Node::Leaf(v)) = self.items.get(name) {
            return Some(v);
        }
        self.items.values().find_map(|node| match node {
            Node::Set(set) => set.deep_search(name),
            Node::Leaf(_) => None,
        })
    }

    /// Dotted paths of every leaf of the given kind, in key order.
    pub fn dictionary(&self, kind: InformationKind) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths(kind, "", &mut out);
        out
    }

    fn collect_paths(&self, kind: InformationKind, prefix: &str, out: &mut Vec<String>) {
        for (name, node) in &self.items {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}{STR_SEP}{name}")
            };
            match node {
                Node::Leaf(v) if v.kind() == kind => out.push(path),
                Node::Leaf(_) => {}
                Node::Set(set) => set.collect_paths(kind, &path, out),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
