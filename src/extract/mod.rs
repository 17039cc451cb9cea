//! Symbol extraction from mod script, interface and localisation files.

mod extractor;
mod rules;
mod types;

pub use extractor::{read_source, Extractor};
pub use rules::{
    is_scripted_loc_reference, is_unqualified, PathFilter, Rule, Scope, SCRIPTED_LOC_RULES,
    SCRIPTED_LOC_SUFFIXES, VARIABLE_RULES,
};
pub use types::{Action, FileClass, Location, Occurrence, SymbolKind};
