//! Line-oriented extraction of symbol occurrences.

use std::path::Path;

use super::{FileClass, Location, Occurrence, Rule};
use crate::analyze::FalsePositiveRegistry;
use crate::error::CheckError;

/// Applies a rule table to file contents.
pub struct Extractor<'a> {
    rules: &'a [Rule],
    registry: &'a FalsePositiveRegistry,
}

impl<'a> Extractor<'a> {
    pub fn new(rules: &'a [Rule], registry: &'a FalsePositiveRegistry) -> Self {
        Self { rules, registry }
    }

    /// Extract every occurrence from one file.
    ///
    /// `file` is the mod-relative path used both to pick rules and to
    /// label the occurrences. Files with an unknown extension yield
    /// nothing.
    pub fn extract<'s>(
        &'s self,
        file: &'s str,
        content: &'s str,
    ) -> impl Iterator<Item = Occurrence> + 's {
        let class = FileClass::from_path(file);
        let rules: Vec<&Rule> = match class {
            Some(c) => self.rules.iter().filter(|r| r.scope.applies(c, file)).collect(),
            None => Vec::new(),
        };
        let strip_comments = class.is_some_and(|c| c.has_hash_comments());
        // No applicable rules: nothing to scan.
        let content = if rules.is_empty() {
            ""
        } else {
            content.strip_prefix('\u{feff}').unwrap_or(content)
        };

        content
            .lines()
            .enumerate()
            .flat_map(move |(idx, raw)| {
                let line = if strip_comments {
                    strip_comment(raw)
                } else {
                    raw
                };
                self.extract_line(&rules, file, idx + 1, line)
            })
    }

    fn extract_line(
        &self,
        rules: &[&Rule],
        file: &str,
        line_number: usize,
        line: &str,
    ) -> Vec<Occurrence> {
        let mut found = Vec::new();

        for rule in rules {
            for caps in rule.pattern.captures_iter(line) {
                let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                if !rule.accepts(name) || self.registry.is_placeholder(name) {
                    continue;
                }
                found.push(Occurrence {
                    kind: rule.kind,
                    name: name.to_string(),
                    location: Location {
                        file: file.to_string(),
                        line: line_number,
                    },
                    action: rule.action,
                });
            }
        }

        found
    }
}

/// Cut a line at the first `#` that is not inside a double-quoted string.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Read a source file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, CheckError> {
    let bytes = std::fs::read(path).map_err(|source| CheckError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| CheckError::Decode {
        path: path.to_path_buf(),
    })
}
