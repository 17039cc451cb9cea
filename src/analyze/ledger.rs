//! Per-kind symbol table built from extracted occurrences.

use indexmap::IndexMap;

use crate::extract::{Action, Location, Occurrence, SymbolKind};

/// Everything recorded for one symbol name.
#[derive(Debug, Clone, Default)]
pub struct LedgerEntry {
    sites: [Vec<Location>; 4],
}

impl LedgerEntry {
    pub fn has(&self, action: Action) -> bool {
        !self.sites[action.index()].is_empty()
    }

    /// Locations of `action`, in the order they were recorded.
    pub fn sites(&self, action: Action) -> &[Location] {
        &self.sites[action.index()]
    }
}

/// Symbol table for every kind, in first-seen order.
#[derive(Debug, Default)]
pub struct SymbolLedger {
    kinds: IndexMap<SymbolKind, IndexMap<String, LedgerEntry>>,
}

impl SymbolLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, occurrence: Occurrence) {
        let entry = self
            .kinds
            .entry(occurrence.kind)
            .or_default()
            .entry(occurrence.name)
            .or_default();
        entry.sites[occurrence.action.index()].push(occurrence.location);
    }

    /// All names recorded for a kind with their entries.
    pub fn entries(&self, kind: SymbolKind) -> impl Iterator<Item = (&str, &LedgerEntry)> {
        self.kinds
            .get(&kind)
            .into_iter()
            .flat_map(|names| names.iter().map(|(name, entry)| (name.as_str(), entry)))
    }

    pub fn get(&self, kind: SymbolKind, name: &str) -> Option<&LedgerEntry> {
        self.kinds.get(&kind)?.get(name)
    }

    /// Number of distinct names recorded for a kind.
    pub fn len(&self, kind: SymbolKind) -> usize {
        self.kinds.get(&kind).map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.values().all(IndexMap::is_empty)
    }
}

impl Extend<Occurrence> for SymbolLedger {
    fn extend<T: IntoIterator<Item = Occurrence>>(&mut self, iter: T) {
        for occurrence in iter {
            self.record(occurrence);
        }
    }
}
