//! Modcheck - cross-reference checker for grand-strategy mod content.
//!
//! Mods define and consume named symbols across hundreds of script,
//! interface and localisation files. Modcheck extracts every set, use and
//! clear of a symbol and reports three kinds of defect:
//!
//! - cleared but never set
//! - used but never defined (missing)
//! - defined but never used (unused)
//!
//! # Architecture
//!
//! - `collect`: file discovery, full tree walk or git-staged files
//! - `extract`: line-oriented rule tables producing occurrences
//! - `analyze`: the symbol ledger, false-positive registry and gap analysis
//! - `runner`: ties collection, extraction and analysis together per checker
//! - `report`: text rendering, colored or plain
//! - `config`: YAML config with allow-lists and path filters
//!
//! # Adding a Symbol Kind
//!
//! Add a `SymbolKind` variant, give it rules in `extract/rules.rs` and list
//! it in the owning `Checker`'s `kinds()`.

pub mod analyze;
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod runner;

pub use analyze::{Defect, DefectCategory, FalsePositiveRegistry, KindDefects, SymbolLedger};
pub use config::Config;
pub use error::CheckError;
pub use extract::{Action, Extractor, Location, Occurrence, SymbolKind};
pub use report::{render, RenderOptions};
pub use runner::{validate, Checker, Runner, ValidationReport};
