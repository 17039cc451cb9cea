//! Consistency defects computed from the ledger.

use super::{FalsePositiveRegistry, SymbolLedger};
use crate::extract::{Action, Location, SymbolKind};

/// The three ways a symbol's lifecycle can be inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectCategory {
    /// Cleared somewhere, never set.
    ClearedNotSet,
    /// Used somewhere, never set.
    MissingDefinition,
    /// Set somewhere, never used.
    UnusedDefinition,
}

impl DefectCategory {
    pub const ALL: [DefectCategory; 3] = [
        DefectCategory::ClearedNotSet,
        DefectCategory::MissingDefinition,
        DefectCategory::UnusedDefinition,
    ];

    /// The action that must be present and the actions that must all be
    /// absent.
    pub fn gap(&self) -> (Action, &'static [Action]) {
        match self {
            DefectCategory::ClearedNotSet => (Action::Clear, &[Action::Set]),
            DefectCategory::MissingDefinition => (Action::Use, &[Action::Set]),
            DefectCategory::UnusedDefinition => (Action::Set, &[Action::Use, Action::Mention]),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DefectCategory::ClearedNotSet => "cleared_not_set",
            DefectCategory::MissingDefinition => "missing_definition",
            DefectCategory::UnusedDefinition => "unused_definition",
        }
    }
}

impl std::fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A symbol with an inconsistent lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    pub kind: SymbolKind,
    pub name: String,
    /// Every site of the action that triggered the defect, first-seen order.
    pub locations: Vec<Location>,
}

impl Defect {
    fn first_location(&self) -> Option<&Location> {
        self.locations.first()
    }
}

/// Names of `kind` that have `present` but none of `absent`.
///
/// `skip` is consulted before a defect is recorded. The result is ordered
/// by first location (file, then line), then by name.
pub fn find_gaps<F>(
    ledger: &SymbolLedger,
    kind: SymbolKind,
    present: Action,
    absent: &[Action],
    skip: F,
) -> Vec<Defect>
where
    F: Fn(&str) -> bool,
{
    let mut defects: Vec<Defect> = ledger
        .entries(kind)
        .filter(|(_, entry)| entry.has(present) && !absent.iter().any(|a| entry.has(*a)))
        .filter(|(name, _)| !skip(name))
        .map(|(name, entry)| Defect {
            kind,
            name: name.to_string(),
            locations: entry.sites(present).to_vec(),
        })
        .collect();

    defects.sort_by(|a, b| {
        a.first_location()
            .cmp(&b.first_location())
            .then_with(|| a.name.cmp(&b.name))
    });
    defects
}

/// Defects found for one symbol kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindDefects {
    pub kind: SymbolKind,
    /// Whether the kind has a clear action at all; kinds without one get
    /// no cleared section in reports.
    pub checks_clear: bool,
    pub cleared: Vec<Defect>,
    pub missing: Vec<Defect>,
    pub unused: Vec<Defect>,
}

impl KindDefects {
    pub fn category(&self, category: DefectCategory) -> &[Defect] {
        match category {
            DefectCategory::ClearedNotSet => &self.cleared,
            DefectCategory::MissingDefinition => &self.missing,
            DefectCategory::UnusedDefinition => &self.unused,
        }
    }

    /// Categories reported for this kind, in report order.
    pub fn categories(&self) -> impl Iterator<Item = DefectCategory> + '_ {
        DefectCategory::ALL
            .into_iter()
            .filter(|c| *c != DefectCategory::ClearedNotSet || self.checks_clear)
    }

    pub fn issue_count(&self) -> usize {
        self.cleared.len() + self.missing.len() + self.unused.len()
    }
}

/// Run all three checks for one kind.
pub fn analyze(
    ledger: &SymbolLedger,
    kind: SymbolKind,
    registry: &FalsePositiveRegistry,
    checks_clear: bool,
) -> KindDefects {
    let run = |category: DefectCategory| {
        let (present, absent) = category.gap();
        find_gaps(ledger, kind, present, absent, |name| {
            registry.is_ignored(kind, name, category)
        })
    };

    KindDefects {
        kind,
        checks_clear,
        cleared: run(DefectCategory::ClearedNotSet),
        missing: run(DefectCategory::MissingDefinition),
        unused: run(DefectCategory::UnusedDefinition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::KindFilter;
    use crate::extract::Occurrence;

    fn occ(kind: SymbolKind, name: &str, file: &str, line: usize, action: Action) -> Occurrence {
        Occurrence {
            kind,
            name: name.to_string(),
            location: Location {
                file: file.to_string(),
                line,
            },
            action,
        }
    }

    fn flag(name: &str, file: &str, line: usize, action: Action) -> Occurrence {
        occ(SymbolKind::CountryFlag, name, file, line, action)
    }

    fn names(defects: &[Defect]) -> Vec<&str> {
        defects.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_unused_reported_once_with_definition_site() {
        let mut ledger = SymbolLedger::new();
        ledger.record(flag("my_flag", "events/a.txt", 3, Action::Set));

        let result = analyze(
            &ledger,
            SymbolKind::CountryFlag,
            &FalsePositiveRegistry::default(),
            true,
        );
        assert_eq!(names(&result.unused), vec!["my_flag"]);
        assert_eq!(result.unused[0].locations[0].line, 3);
        assert!(result.missing.is_empty());
        assert!(result.cleared.is_empty());
    }

    #[test]
    fn test_missing_lists_every_use_site_in_order() {
        let mut ledger = SymbolLedger::new();
        ledger.record(flag("ghost_flag", "a.txt", 10, Action::Use));
        ledger.record(flag("ghost_flag", "a.txt", 20, Action::Use));
        ledger.record(flag("ghost_flag", "b.txt", 1, Action::Use));

        let result = analyze(
            &ledger,
            SymbolKind::CountryFlag,
            &FalsePositiveRegistry::default(),
            true,
        );
        assert_eq!(result.missing.len(), 1);
        let lines: Vec<String> = result.missing[0]
            .locations
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(lines, vec!["a.txt:10", "a.txt:20", "b.txt:1"]);
    }

    #[test]
    fn test_cleared_and_used_without_set_is_reported_twice() {
        let mut ledger = SymbolLedger::new();
        ledger.record(flag("twice", "a.txt", 1, Action::Use));
        ledger.record(flag("twice", "a.txt", 2, Action::Clear));

        let result = analyze(
            &ledger,
            SymbolKind::CountryFlag,
            &FalsePositiveRegistry::default(),
            true,
        );
        assert_eq!(names(&result.cleared), vec!["twice"]);
        assert_eq!(names(&result.missing), vec!["twice"]);
        assert_eq!(result.issue_count(), 2);
    }

    #[test]
    fn test_consistent_symbol_has_no_defects() {
        let mut ledger = SymbolLedger::new();
        ledger.record(flag("ok", "a.txt", 1, Action::Set));
        ledger.record(flag("ok", "a.txt", 2, Action::Use));
        ledger.record(flag("ok", "a.txt", 3, Action::Clear));

        let result = analyze(
            &ledger,
            SymbolKind::CountryFlag,
            &FalsePositiveRegistry::default(),
            true,
        );
        assert_eq!(result.issue_count(), 0);
    }

    #[test]
    fn test_ordering_by_first_location() {
        let mut ledger = SymbolLedger::new();
        ledger.record(flag("late", "b.txt", 1, Action::Use));
        ledger.record(flag("early", "a.txt", 9, Action::Use));
        ledger.record(flag("earlier", "a.txt", 2, Action::Use));

        let defects = find_gaps(
            &ledger,
            SymbolKind::CountryFlag,
            Action::Use,
            &[Action::Set],
            |_| false,
        );
        assert_eq!(names(&defects), vec!["earlier", "early", "late"]);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut ledger = SymbolLedger::new();
        ledger.record(occ(SymbolKind::CountryFlag, "shared", "a.txt", 1, Action::Set));
        ledger.record(occ(SymbolKind::StateFlag, "shared", "a.txt", 2, Action::Use));

        let registry = FalsePositiveRegistry::default();
        let country = analyze(&ledger, SymbolKind::CountryFlag, &registry, true);
        let state = analyze(&ledger, SymbolKind::StateFlag, &registry, true);
        assert_eq!(names(&country.unused), vec!["shared"]);
        assert_eq!(names(&state.missing), vec!["shared"]);
    }

    #[test]
    fn test_registry_suppresses_defects() {
        let mut ledger = SymbolLedger::new();
        ledger.record(flag("kr_current_version", "a.txt", 1, Action::Use));
        ledger.record(flag("EU_QMV_voted", "a.txt", 2, Action::Set));
        ledger.record(flag("keep_me", "a.txt", 3, Action::Set));

        let registry = FalsePositiveRegistry::default().with_kind_filter(
            SymbolKind::CountryFlag,
            KindFilter {
                ignore: Vec::new(),
                ignore_unset: Vec::new(),
                ignore_unused: vec!["_QMV".to_string()],
            },
        );
        let result = analyze(&ledger, SymbolKind::CountryFlag, &registry, true);
        assert!(result.missing.is_empty());
        assert_eq!(names(&result.unused), vec!["keep_me"]);
    }

    #[test]
    fn test_custom_registry_with_no_allow_list() {
        let mut ledger = SymbolLedger::new();
        ledger.record(flag("kr_current_version", "a.txt", 1, Action::Use));

        let registry = FalsePositiveRegistry::new(Vec::new(), Vec::new());
        let result = analyze(&ledger, SymbolKind::CountryFlag, &registry, true);
        assert_eq!(names(&result.missing), vec!["kr_current_version"]);
    }

    #[test]
    fn test_mention_only_satisfies_unused() {
        let mut ledger = SymbolLedger::new();
        let target = |name: &str, line: usize, action: Action| {
            occ(SymbolKind::EventTarget, name, "loc.yml", line, action)
        };
        ledger.record(target("leader", 1, Action::Set));
        ledger.record(target("leader", 2, Action::Mention));
        ledger.record(target("ROOT", 3, Action::Mention));

        let result = analyze(
            &ledger,
            SymbolKind::EventTarget,
            &FalsePositiveRegistry::default(),
            true,
        );
        assert!(result.unused.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_categories_without_clear() {
        let ledger = SymbolLedger::new();
        let result = analyze(
            &ledger,
            SymbolKind::ScriptedLocalisation,
            &FalsePositiveRegistry::default(),
            false,
        );
        let categories: Vec<_> = result.categories().collect();
        assert_eq!(
            categories,
            vec![
                DefectCategory::MissingDefinition,
                DefectCategory::UnusedDefinition
            ]
        );
    }
}
