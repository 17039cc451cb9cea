//! Files staged in the git index.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{CheckError, Result};

/// A git repository discovered from a path inside it.
pub struct StagedIndex {
    repo: gix::Repository,
    workdir: PathBuf,
}

impl StagedIndex {
    /// Find the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = gix::discover(path)
            .map_err(|e| CheckError::Git(format!("no git repository at {}: {e}", path.display())))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| CheckError::Git("repository has no working directory".into()))?
            .to_path_buf();
        let workdir = workdir.canonicalize().unwrap_or(workdir);
        Ok(Self { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Files whose index entry differs from `HEAD`, as absolute paths.
    ///
    /// In a repository without commits every index entry counts as staged.
    /// Entries that no longer exist on disk are dropped.
    pub fn staged_files(&self) -> Result<Vec<PathBuf>> {
        let index = self
            .repo
            .open_index()
            .map_err(|e| CheckError::Git(format!("failed to open index: {e}")))?;

        let head = match self.repo.head_commit() {
            Ok(commit) => {
                let tree = commit
                    .tree()
                    .map_err(|e| CheckError::Git(format!("failed to read HEAD tree: {e}")))?;
                let mut blobs = HashMap::new();
                collect_tree_blobs(&tree, Path::new(""), &mut blobs)?;
                blobs
            }
            Err(_) => HashMap::new(),
        };

        let mut staged = Vec::new();
        for entry in index.entries() {
            let path = PathBuf::from(String::from_utf8_lossy(entry.path(&index)).as_ref());
            if head.get(&path) == Some(&entry.id) {
                continue;
            }
            let full = self.workdir.join(&path);
            if full.is_file() {
                staged.push(full);
            }
        }

        staged.sort();
        staged.dedup();
        Ok(staged)
    }
}

fn collect_tree_blobs(
    tree: &gix::Tree<'_>,
    prefix: &Path,
    blobs: &mut HashMap<PathBuf, gix::ObjectId>,
) -> Result<()> {
    for entry in tree.iter() {
        let entry =
            entry.map_err(|e| CheckError::Git(format!("failed to read tree entry: {e}")))?;
        let name = String::from_utf8_lossy(entry.filename()).to_string();
        let path = prefix.join(name);

        match entry.mode().kind() {
            gix::object::tree::EntryKind::Blob | gix::object::tree::EntryKind::BlobExecutable => {
                blobs.insert(path, entry.oid().into());
            }
            gix::object::tree::EntryKind::Tree => {
                let subtree = entry
                    .object()
                    .map_err(|e| CheckError::Git(format!("failed to read subtree: {e}")))?
                    .into_tree();
                collect_tree_blobs(&subtree, &path, blobs)?;
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(dir: &Path, args: &[&str]) {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("failed to run git");
    }

    fn create_git_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        git(dir.path(), &["init"]);
        git(dir.path(), &["config", "user.email", "test@test.com"]);
        git(dir.path(), &["config", "user.name", "Test User"]);
        dir
    }

    fn canonical(files: &[PathBuf]) -> Vec<PathBuf> {
        files.iter().map(|f| f.canonicalize().unwrap()).collect()
    }

    #[test]
    fn test_discover_fails_for_missing_path() {
        let result = StagedIndex::discover(Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(matches!(result, Err(CheckError::Git(_))));
    }

    #[test]
    fn test_staged_files_without_commits() {
        let dir = create_git_repo();
        std::fs::write(dir.path().join("a.txt"), "set_country_flag = x").unwrap();
        git(dir.path(), &["add", "a.txt"]);

        let index = StagedIndex::discover(dir.path()).unwrap();
        let staged = index.staged_files().unwrap();
        assert_eq!(
            canonical(&staged),
            vec![dir.path().join("a.txt").canonicalize().unwrap()]
        );
    }

    #[test]
    fn test_committed_and_unstaged_files_are_not_staged() {
        let dir = create_git_repo();
        std::fs::write(dir.path().join("old.txt"), "a").unwrap();
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-m", "initial"]);

        std::fs::write(dir.path().join("old.txt"), "changed but not staged").unwrap();
        std::fs::create_dir_all(dir.path().join("events")).unwrap();
        std::fs::write(dir.path().join("events/new.txt"), "b").unwrap();
        git(dir.path(), &["add", "events/new.txt"]);

        let index = StagedIndex::discover(dir.path()).unwrap();
        let staged = index.staged_files().unwrap();
        assert_eq!(
            canonical(&staged),
            vec![dir.path().join("events/new.txt").canonicalize().unwrap()]
        );
    }

    #[test]
    fn test_nothing_staged() {
        let dir = create_git_repo();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-m", "initial"]);

        let index = StagedIndex::discover(dir.path()).unwrap();
        assert!(index.staged_files().unwrap().is_empty());
    }
}
