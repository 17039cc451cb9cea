//! File collection: which files of the mod tree a checker scans.

mod files;
mod staged;

pub use files::collect_files;
pub use staged::StagedIndex;

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

use crate::error::{CheckError, Result};

/// Directories that hold art, tooling and map data rather than script.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &["gfx", "tools", "resources", "docs", "map"];

/// Filters applied to every candidate file.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub extensions: Vec<String>,
    pub ignored_dirs: Vec<String>,
    excluded: Option<GlobSet>,
}

impl CollectOptions {
    /// Options accepting `extensions`, with the default ignored directories.
    pub fn new(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|d| d.to_string()).collect(),
            excluded: None,
        }
    }

    pub fn with_ignored_dirs(mut self, dirs: Vec<String>) -> Self {
        self.ignored_dirs = dirs;
        self
    }

    /// Exclude files whose mod-relative path matches any glob.
    pub fn with_excluded_paths(mut self, patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            self.excluded = None;
            return Ok(self);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| CheckError::Config(format!("invalid glob {pattern:?}: {e}")))?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| CheckError::Config(format!("invalid excluded_paths: {e}")))?;
        self.excluded = Some(set);
        Ok(self)
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }

    /// Whether a mod-relative, `/`-separated file path should be scanned.
    pub fn accepts(&self, relative: &str) -> bool {
        let Some((dirs, file)) = split_dirs(relative) else {
            return false;
        };

        let ext = file.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
        if !self.extensions.iter().any(|e| e == ext) {
            return false;
        }

        if dirs
            .iter()
            .any(|d| d.starts_with('.') || d.is_empty() || self.is_ignored_dir(d))
        {
            return false;
        }

        match &self.excluded {
            Some(set) => !set.is_match(relative),
            None => true,
        }
    }
}

fn split_dirs(relative: &str) -> Option<(Vec<&str>, &str)> {
    let mut parts: Vec<&str> = relative.split('/').collect();
    let file = parts.pop()?;
    if file.is_empty() {
        return None;
    }
    Some((parts, file))
}

/// Path of `path` relative to `root`, always `/`-separated.
pub fn relative_path(root: &Path, path: &Path) -> String {
    if path == root {
        return path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
    }

    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Collect the staged files under `root` accepted by `options`.
///
/// Fails with [`CheckError::EmptyInput`] when nothing relevant is staged.
pub fn collect_staged(root: &Path, options: &CollectOptions) -> Result<Vec<PathBuf>> {
    let index = StagedIndex::discover(root)?;
    let files: Vec<PathBuf> = index
        .staged_files()?
        .into_iter()
        .filter(|path| path.starts_with(root))
        .filter(|path| options.accepts(&relative_path(root, path)))
        .collect();

    tracing::debug!(count = files.len(), workdir = %index.workdir().display(), "collected staged files");
    if files.is_empty() {
        return Err(CheckError::EmptyInput);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        let options = CollectOptions::new(&["txt", "gui"]);
        assert!(options.accepts("events/a.txt"));
        assert!(options.accepts("interface/x.gui"));
        assert!(options.accepts("top_level.txt"));
        assert!(!options.accepts("localisation/x.yml"));
        assert!(!options.accepts("gfx/x.txt"));
        assert!(!options.accepts("common/docs/x.txt"));
        assert!(!options.accepts(".github/x.txt"));
        assert!(!options.accepts("events/"));
        assert!(!options.accepts("events/noext"));
    }

    #[test]
    fn test_custom_ignored_dirs() {
        let options = CollectOptions::new(&["txt"]).with_ignored_dirs(vec!["history".into()]);
        assert!(options.accepts("gfx/x.txt"));
        assert!(!options.accepts("history/x.txt"));
    }

    #[test]
    fn test_invalid_glob_is_config_error() {
        let result = CollectOptions::new(&["txt"]).with_excluded_paths(&["[".to_string()]);
        assert!(matches!(result, Err(CheckError::Config(_))));
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/mod");
        assert_eq!(
            relative_path(root, Path::new("/mod/events/a.txt")),
            "events/a.txt"
        );
        assert_eq!(relative_path(root, Path::new("/other/a.txt")), "/other/a.txt");
    }
}
