//! Runs one checker over a mod tree: collect, extract, analyze.

use std::path::{Path, PathBuf};

use crate::analyze::{analyze, FalsePositiveRegistry, KindDefects, SymbolLedger};
use crate::collect::{collect_files, collect_staged, relative_path, CollectOptions};
use crate::config::Config;
use crate::error::Result;
use crate::extract::{
    read_source, Action, Extractor, Rule, SymbolKind, SCRIPTED_LOC_RULES, VARIABLE_RULES,
};

/// The independent checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checker {
    /// Country, state and global flags plus event targets.
    Variables,
    ScriptedLocalisation,
}

impl Checker {
    pub const ALL: [Checker; 2] = [Checker::Variables, Checker::ScriptedLocalisation];

    /// Name used on the command line and in report file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Checker::Variables => "variables",
            Checker::ScriptedLocalisation => "scripted-loc",
        }
    }

    /// Report title.
    pub fn title(&self) -> &'static str {
        match self {
            Checker::Variables => "VARIABLE AND EVENT TARGET VALIDATION",
            Checker::ScriptedLocalisation => "SCRIPTED LOCALISATION VALIDATION",
        }
    }

    /// Kinds checked, in report order.
    pub fn kinds(&self) -> &'static [SymbolKind] {
        match self {
            Checker::Variables => &[
                SymbolKind::CountryFlag,
                SymbolKind::GlobalFlag,
                SymbolKind::StateFlag,
                SymbolKind::EventTarget,
            ],
            Checker::ScriptedLocalisation => &[SymbolKind::ScriptedLocalisation],
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Checker::Variables => &["txt", "yml"],
            Checker::ScriptedLocalisation => &["txt", "gui", "yml"],
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Checker::Variables => &VARIABLE_RULES,
            Checker::ScriptedLocalisation => &SCRIPTED_LOC_RULES,
        }
    }

    /// Whether any rule of this checker produces a clear for `kind`.
    pub fn clears(&self, kind: SymbolKind) -> bool {
        self.rules()
            .iter()
            .any(|r| r.kind == kind && r.action == Action::Clear)
    }
}

impl std::fmt::Display for Checker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one checker run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub checker: Checker,
    /// Files read and scanned.
    pub scanned: usize,
    /// Files skipped because they could not be read.
    pub skipped: usize,
    pub kinds: Vec<KindDefects>,
}

impl ValidationReport {
    /// Total number of defect entries across all kinds and categories.
    pub fn issue_count(&self) -> usize {
        self.kinds.iter().map(KindDefects::issue_count).sum()
    }

    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }
}

/// Executes a checker against a set of files.
pub struct Runner<'a> {
    root: PathBuf,
    registry: &'a FalsePositiveRegistry,
}

impl<'a> Runner<'a> {
    pub fn new<P: AsRef<Path>>(root: P, registry: &'a FalsePositiveRegistry) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            registry,
        }
    }

    /// Scan `files` and analyze every kind of `checker`.
    ///
    /// Unreadable files are logged and counted as skipped.
    pub fn run(&self, checker: Checker, files: &[PathBuf]) -> ValidationReport {
        let extractor = Extractor::new(checker.rules(), self.registry);
        let mut ledger = SymbolLedger::new();
        let mut scanned = 0;
        let mut skipped = 0;

        for path in files {
            let content = match read_source(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("skipping file: {e}");
                    skipped += 1;
                    continue;
                }
            };
            let relative = relative_path(&self.root, path);
            ledger.extend(extractor.extract(&relative, &content));
            scanned += 1;
        }

        let kinds = checker
            .kinds()
            .iter()
            .map(|&kind| {
                tracing::debug!(%kind, names = ledger.len(kind), "analyzing");
                analyze(&ledger, kind, self.registry, checker.clears(kind))
            })
            .collect();

        ValidationReport {
            checker,
            scanned,
            skipped,
            kinds,
        }
    }
}

/// Collect the files for `checker` under `root` and run it.
///
/// With `staged`, only git-staged files are scanned, and an empty staged
/// set is [`crate::CheckError::EmptyInput`].
pub fn validate(
    checker: Checker,
    root: &Path,
    config: &Config,
    staged: bool,
) -> Result<ValidationReport> {
    let options: CollectOptions = config.collect_options(checker.extensions())?;
    let files = if staged {
        collect_staged(root, &options)?
    } else {
        collect_files(root, &options)
    };

    let registry = config.registry();
    Ok(Runner::new(root, &registry).run(checker, &files))
}
