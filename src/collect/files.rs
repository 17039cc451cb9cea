//! Directory walk over the mod root.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{relative_path, CollectOptions};

/// Collect every file under `root` accepted by `options`, sorted by path.
///
/// Unreadable directory entries are logged and skipped.
pub fn collect_files(root: &Path, options: &CollectOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories (.git and friends) and ignored ones
            !name.starts_with('.') && !options.is_ignored_dir(&name)
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = relative_path(root, entry.path());
        if options.accepts(&relative) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(count = files.len(), root = %root.display(), "collected files");
    files
}
