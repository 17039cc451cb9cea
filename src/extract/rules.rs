//! Pattern tables mapping script text to symbol occurrences.
//!
//! Every rule is a row: which kind and action it produces, which files it
//! applies to, the pattern whose first capture group is the symbol name,
//! and an optional predicate the name must satisfy. New symbol kinds are
//! added here without touching the extractor.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Action, FileClass, SymbolKind};

/// Characters that can never be part of a captured name.
const NAME: &str = r#"([^\s#"{}=\]]+)"#;

/// Suffixes that mark a localisation reference as scripted.
pub const SCRIPTED_LOC_SUFFIXES: &[&str] = &["_scripted_loc", "_scl"];

/// Files whose path contains this fragment hold tag aliases, which use
/// global event targets instead of saving them.
const TAG_ALIASES: &str = "tag_aliases";

/// Restricts a rule to some files by path fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFilter {
    Any,
    Within(&'static str),
    Outside(&'static str),
}

/// Which files a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub class: FileClass,
    pub path: PathFilter,
}

impl Scope {
    const fn class(class: FileClass) -> Self {
        Self {
            class,
            path: PathFilter::Any,
        }
    }

    const fn within(class: FileClass, fragment: &'static str) -> Self {
        Self {
            class,
            path: PathFilter::Within(fragment),
        }
    }

    const fn outside(class: FileClass, fragment: &'static str) -> Self {
        Self {
            class,
            path: PathFilter::Outside(fragment),
        }
    }

    pub fn applies(&self, class: FileClass, path: &str) -> bool {
        if self.class != class {
            return false;
        }
        match self.path {
            PathFilter::Any => true,
            PathFilter::Within(fragment) => path.contains(fragment),
            PathFilter::Outside(fragment) => !path.contains(fragment),
        }
    }
}

/// One extraction rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: SymbolKind,
    pub action: Action,
    pub scope: Scope,
    pub pattern: Regex,
    pub accept: Option<fn(&str) -> bool>,
}

impl Rule {
    /// Build a rule from a pattern. Panics on an invalid pattern, so only
    /// use it with literal tables.
    pub fn new(kind: SymbolKind, action: Action, scope: Scope, pattern: &str) -> Self {
        Self {
            kind,
            action,
            scope,
            pattern: Regex::new(pattern).expect("rule patterns are valid regexes"),
            accept: None,
        }
    }

    pub fn accepting(mut self, accept: fn(&str) -> bool) -> Self {
        self.accept = Some(accept);
        self
    }

    /// Whether a captured name passes this rule's predicate.
    pub fn accepts(&self, name: &str) -> bool {
        self.accept.map_or(true, |f| f(name))
    }
}

/// Scope-qualified references (`x.GetName`) are not symbol names.
pub fn is_unqualified(name: &str) -> bool {
    !name.contains('.')
}

/// Localisation references count only when they carry a scripted suffix.
pub fn is_scripted_loc_reference(name: &str) -> bool {
    is_unqualified(name) && SCRIPTED_LOC_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Flag kinds and the scope word their commands use.
const FLAG_KINDS: &[(SymbolKind, &str)] = &[
    (SymbolKind::CountryFlag, "country"),
    (SymbolKind::StateFlag, "state"),
    (SymbolKind::GlobalFlag, "global"),
];

fn flag_rules(kind: SymbolKind, scope: &str) -> Vec<Rule> {
    let script = Scope::class(FileClass::Script);
    let plain = |verb: &str| format!(r"\b{verb}_{scope}_flag\s*=\s*{NAME}");
    let block = |verb: &str| format!(r"\b{verb}_{scope}_flag\s*=\s*\{{[^}}]*?\bflag\s*=\s*{NAME}");

    vec![
        Rule::new(kind, Action::Set, script, &plain("set")),
        Rule::new(kind, Action::Set, script, &block("set")),
        Rule::new(kind, Action::Use, script, &plain("has")),
        Rule::new(kind, Action::Use, script, &block("has")),
        Rule::new(kind, Action::Use, script, &block("modify")),
        Rule::new(kind, Action::Clear, script, &plain("clr")),
    ]
}

fn event_target_rules() -> Vec<Rule> {
    let kind = SymbolKind::EventTarget;
    let script = Scope::outside(FileClass::Script, TAG_ALIASES);
    let aliases = Scope::within(FileClass::Script, TAG_ALIASES);
    let loc = Scope::class(FileClass::Localisation);

    vec![
        Rule::new(kind, Action::Set, script, &format!(r"\bsave_event_target_as\s*=\s*{NAME}")),
        Rule::new(
            kind,
            Action::Set,
            script,
            &format!(r"\bsave_global_event_target_as\s*=\s*{NAME}"),
        ),
        Rule::new(kind, Action::Use, script, &format!(r"\bevent_target:{NAME}")),
        Rule::new(kind, Action::Use, script, &format!(r"\bhas_event_target\s*=\s*{NAME}")),
        Rule::new(kind, Action::Use, aliases, &format!(r"\bglobal_event_target\s*=\s*{NAME}")),
        Rule::new(kind, Action::Mention, loc, r"(?i)\[([A-Za-z0-9_]+)\.get(?:name|adjective)"),
        Rule::new(
            kind,
            Action::Clear,
            Scope::class(FileClass::Script),
            &format!(r"\bclear_global_event_target\s*=\s*{NAME}"),
        ),
    ]
    .into_iter()
    .map(|r| r.accepting(is_unqualified))
    .collect()
}

fn scripted_loc_rules() -> Vec<Rule> {
    let kind = SymbolKind::ScriptedLocalisation;

    vec![
        Rule::new(
            kind,
            Action::Set,
            Scope::class(FileClass::Script),
            &format!(r#"\blocalization_key\s*=\s*"?{NAME}"#),
        )
        .accepting(is_unqualified),
        Rule::new(
            kind,
            Action::Use,
            Scope::class(FileClass::Interface),
            r#"\btext\s*=\s*"\[([A-Za-z0-9_.]+)\]""#,
        )
        .accepting(is_unqualified),
        Rule::new(
            kind,
            Action::Use,
            Scope::class(FileClass::Localisation),
            r"\[([A-Za-z0-9_.]+)\]",
        )
        .accepting(is_scripted_loc_reference),
    ]
}

/// Rules for flags and event targets.
pub static VARIABLE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules: Vec<Rule> = FLAG_KINDS
        .iter()
        .flat_map(|&(kind, scope)| flag_rules(kind, scope))
        .collect();
    rules.extend(event_target_rules());
    rules
});

/// Rules for scripted localisation keys.
pub static SCRIPTED_LOC_RULES: Lazy<Vec<Rule>> = Lazy::new(scripted_loc_rules);
