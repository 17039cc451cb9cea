//! Cross-file consistency analysis.

mod defects;
mod false_positives;
mod ledger;

pub use defects::{analyze, find_gaps, Defect, DefectCategory, KindDefects};
pub use false_positives::{
    FalsePositiveRegistry, KindFilter, DEFAULT_IGNORED_NAMES, DEFAULT_PLACEHOLDER_MARKERS,
};
pub use ledger::{LedgerEntry, SymbolLedger};
