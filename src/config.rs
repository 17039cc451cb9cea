//! Configuration file for modcheck.
//!
//! A config tunes which files are scanned and which names are known false
//! positives. Every field is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::{
    FalsePositiveRegistry, KindFilter, DEFAULT_IGNORED_NAMES, DEFAULT_PLACEHOLDER_MARKERS,
};
use crate::collect::{CollectOptions, DEFAULT_IGNORED_DIRS};
use crate::error::{CheckError, Result};
use crate::extract::SymbolKind;

/// Config file names looked up in the mod root.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["modcheck.yaml", ".modcheck.yaml"];

/// Top-level config definition.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Directory names never descended into.
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,
    /// Glob patterns on mod-relative paths to leave out (e.g. "history/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Names containing any of these are placeholders and never extracted.
    #[serde(default = "default_placeholder_markers")]
    pub placeholder_markers: Vec<String>,
    /// Exact names never reported, whatever their kind.
    #[serde(default = "default_ignored_names")]
    pub ignored_names: Vec<String>,
    /// Per-kind substring filters, keyed by kind (e.g. `country_flag`).
    #[serde(default)]
    pub kinds: BTreeMap<String, KindConfig>,
}

/// Substring filters for one symbol kind.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct KindConfig {
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Only for the cleared and missing checks.
    #[serde(default)]
    pub ignore_unset: Vec<String>,
    /// Only for the unused check.
    #[serde(default)]
    pub ignore_unused: Vec<String>,
}

fn default_ignored_dirs() -> Vec<String> {
    DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_placeholder_markers() -> Vec<String> {
    DEFAULT_PLACEHOLDER_MARKERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_ignored_names() -> Vec<String> {
    DEFAULT_IGNORED_NAMES.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignored_dirs: default_ignored_dirs(),
            excluded_paths: Vec::new(),
            placeholder_markers: default_placeholder_markers(),
            ignored_names: default_ignored_names(),
            kinds: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CheckError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content).map_err(|e| match e {
            CheckError::Config(msg) => CheckError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse and validate a config from YAML text. Empty text is the default.
    pub fn parse_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| CheckError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config for a mod root: `explicit` if given, else the first
    /// default name present in `root`, else defaults.
    ///
    /// Returns the path the config was read from, if any.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::parse_file(path)?, Some(path.to_path_buf())));
        }
        match discover(root) {
            Some(path) => Ok((Self::parse_file(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Check kind keys and glob patterns.
    pub fn validate(&self) -> Result<()> {
        for key in self.kinds.keys() {
            if SymbolKind::parse(key).is_none() {
                let known: Vec<&str> = SymbolKind::ALL.iter().map(|k| k.as_str()).collect();
                return Err(CheckError::Config(format!(
                    "unknown kind {:?} (expected one of {})",
                    key,
                    known.join(", ")
                )));
            }
        }
        for pattern in &self.excluded_paths {
            globset::Glob::new(pattern).map_err(|e| {
                CheckError::Config(format!("invalid excluded_paths pattern {pattern:?}: {e}"))
            })?;
        }
        Ok(())
    }

    /// Build the false-positive registry described by this config.
    pub fn registry(&self) -> FalsePositiveRegistry {
        let mut registry = FalsePositiveRegistry::new(
            self.placeholder_markers.iter().cloned(),
            self.ignored_names.iter().cloned(),
        );
        for (key, kind_config) in &self.kinds {
            if let Some(kind) = SymbolKind::parse(key) {
                registry = registry.with_kind_filter(
                    kind,
                    KindFilter {
                        ignore: kind_config.ignore.clone(),
                        ignore_unset: kind_config.ignore_unset.clone(),
                        ignore_unused: kind_config.ignore_unused.clone(),
                    },
                );
            }
        }
        registry
    }

    /// Collection options for the given extensions.
    pub fn collect_options(&self, extensions: &[&str]) -> Result<CollectOptions> {
        CollectOptions::new(extensions)
            .with_ignored_dirs(self.ignored_dirs.clone())
            .with_excluded_paths(&self.excluded_paths)
    }
}

/// Find a config file in `root`.
pub fn discover(root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}
