//! Core types for extracted symbols.

/// The family of named symbols a rule extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    CountryFlag,
    StateFlag,
    GlobalFlag,
    EventTarget,
    ScriptedLocalisation,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 5] = [
        SymbolKind::CountryFlag,
        SymbolKind::StateFlag,
        SymbolKind::GlobalFlag,
        SymbolKind::EventTarget,
        SymbolKind::ScriptedLocalisation,
    ];

    /// Key used for this kind in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::CountryFlag => "country_flag",
            SymbolKind::StateFlag => "state_flag",
            SymbolKind::GlobalFlag => "global_flag",
            SymbolKind::EventTarget => "event_target",
            SymbolKind::ScriptedLocalisation => "scripted_localisation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Plural label used in report headings.
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::CountryFlag => "country flags",
            SymbolKind::StateFlag => "state flags",
            SymbolKind::GlobalFlag => "global flags",
            SymbolKind::EventTarget => "event targets",
            SymbolKind::ScriptedLocalisation => "scripted localisations",
        }
    }

    /// Verb used for the Set action of this kind.
    pub fn set_verb(&self) -> &'static str {
        match self {
            SymbolKind::ScriptedLocalisation => "defined",
            _ => "set",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an occurrence does to its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Set for flags and event targets, define for scripted localisation.
    Set,
    Use,
    Clear,
    /// Referenced from display text. Satisfies the unused check but does
    /// not require a definition.
    Mention,
}

impl Action {
    pub(crate) fn index(self) -> usize {
        match self {
            Action::Set => 0,
            Action::Use => 1,
            Action::Clear => 2,
            Action::Mention => 3,
        }
    }
}

/// A file and line an occurrence was found at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// Path relative to the mod root, `/`-separated.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One extracted reference to a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub kind: SymbolKind,
    pub name: String,
    pub location: Location,
    pub action: Action,
}

/// How a file is treated by the rule table, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// `.txt` game script
    Script,
    /// `.gui` interface definition
    Interface,
    /// `.yml` localisation
    Localisation,
}

impl FileClass {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(FileClass::Script),
            "gui" => Some(FileClass::Interface),
            "yml" => Some(FileClass::Localisation),
            _ => None,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let ext = path.rsplit_once('.').map(|(_, e)| e)?;
        Self::from_extension(ext)
    }

    /// Whether `#` starts a comment in this kind of file.
    pub fn has_hash_comments(&self) -> bool {
        !matches!(self, FileClass::Localisation)
    }
}
