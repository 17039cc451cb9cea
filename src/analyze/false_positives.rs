//! Names that must never be reported.
//!
//! The registry is built once from configuration and shared read-only by
//! the extractor (placeholder markers) and the analyzer (allow-lists).

use std::collections::{HashMap, HashSet};

use super::DefectCategory;
use crate::extract::SymbolKind;

/// Markers that identify template placeholders and computed names.
pub const DEFAULT_PLACEHOLDER_MARKERS: &[&str] = &["@", "[", "{"];

/// Infrastructure symbols managed outside the normal lifecycle.
pub const DEFAULT_IGNORED_NAMES: &[&str] = &["kr_current_version"];

/// Substring filters for one symbol kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindFilter {
    /// Skip matching names in every category.
    pub ignore: Vec<String>,
    /// Skip matching names only when reporting cleared or missing names,
    /// i.e. where a set is lacking.
    pub ignore_unset: Vec<String>,
    /// Skip matching names only when reporting unused definitions.
    pub ignore_unused: Vec<String>,
}

/// Immutable set of false-positive rules.
#[derive(Debug, Clone)]
pub struct FalsePositiveRegistry {
    markers: Vec<String>,
    names: HashSet<String>,
    kinds: HashMap<SymbolKind, KindFilter>,
}

impl Default for FalsePositiveRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_PLACEHOLDER_MARKERS.iter().map(|s| s.to_string()),
            DEFAULT_IGNORED_NAMES.iter().map(|s| s.to_string()),
        )
    }
}

impl FalsePositiveRegistry {
    pub fn new<M, N>(markers: M, names: N) -> Self
    where
        M: IntoIterator<Item = String>,
        N: IntoIterator<Item = String>,
    {
        Self {
            markers: markers.into_iter().filter(|m| !m.is_empty()).collect(),
            names: names.into_iter().collect(),
            kinds: HashMap::new(),
        }
    }

    /// Attach substring filters for a kind, replacing any previous ones.
    pub fn with_kind_filter(mut self, kind: SymbolKind, filter: KindFilter) -> Self {
        self.kinds.insert(kind, filter);
        self
    }

    /// Whether a captured name is a template placeholder or computed name.
    pub fn is_placeholder(&self, name: &str) -> bool {
        self.markers.iter().any(|m| name.contains(m.as_str()))
    }

    /// Whether a name must be left out of the given defect category.
    pub fn is_ignored(&self, kind: SymbolKind, name: &str, category: DefectCategory) -> bool {
        if self.is_placeholder(name) || self.names.contains(name) {
            return true;
        }

        let Some(filter) = self.kinds.get(&kind) else {
            return false;
        };

        let matches = |fragments: &[String]| fragments.iter().any(|f| name.contains(f.as_str()));
        if matches(&filter.ignore) {
            return true;
        }
        match category {
            DefectCategory::ClearedNotSet | DefectCategory::MissingDefinition => {
                matches(&filter.ignore_unset)
            }
            DefectCategory::UnusedDefinition => matches(&filter.ignore_unused),
        }
    }
}
