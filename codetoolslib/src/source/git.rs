//! Git collaborators: tracked file listing and per-file revision years.
//!
//! Both read the repository directly through gix, without spawning `git`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike};

use crate::error::CodetoolsError;
use crate::Result;

/// Source of the calendar years in which a file was modified.
///
/// The banner writer uses the earliest year as the copyright start year
/// when the configuration leaves it empty.
pub trait RevisionHistory {
    /// Sorted set of years in which `path` changed.
    fn modification_years(&self, path: &Path) -> Result<BTreeSet<i32>>;
}

/// Revision history read from the git repository containing a folder.
pub struct GitHistory {
    repo: gix::Repository,
    root: PathBuf,
}

fn open_repo(path: &Path) -> Result<(gix::Repository, PathBuf)> {
    let repo = gix::discover(path)
        .map_err(|e| CodetoolsError::GitError(format!("Failed to discover git repository: {}", e)))?;

    let root = repo
        .work_dir()
        .ok_or_else(|| CodetoolsError::GitError("Repository has no work directory".to_string()))?
        .canonicalize()?;

    Ok((repo, root))
}

/// Path of `path` relative to the repository root.
fn repo_relative(root: &Path, path: &Path) -> Result<PathBuf> {
    let absolute = path.canonicalize().map_err(|e| CodetoolsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    absolute
        .strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| {
            CodetoolsError::GitError(format!(
                "'{}' is outside of repository '{}'",
                path.display(),
                root.display()
            ))
        })
}

impl GitHistory {
    /// Open the repository that contains `path`.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let (repo, root) = open_repo(path.as_ref())?;
        Ok(Self { repo, root })
    }

    /// Blob id of `path` in the tree of `commit`, if the file exists there.
    fn blob_id(
        &self,
        commit: &gix::Commit<'_>,
        path: &Path,
    ) -> std::result::Result<Option<gix::ObjectId>, String> {
        let mut tree = commit
            .tree()
            .map_err(|e| format!("Failed to get tree for {}: {}", commit.id, e))?;
        let entry = tree
            .peel_to_entry_by_path(path)
            .map_err(|e| format!("Failed to look up entry in {}: {}", commit.id, e))?;
        Ok(entry.map(|e| e.object_id()))
    }

    fn collect_years(&self, relative: &Path) -> std::result::Result<BTreeSet<i32>, String> {
        let head = self
            .repo
            .head_commit()
            .map_err(|e| format!("Failed to get HEAD commit: {}", e))?;
        let walk = head
            .ancestors()
            .all()
            .map_err(|e| format!("Failed to walk history: {}", e))?;

        let mut years = BTreeSet::new();

        for info in walk {
            let info = info.map_err(|e| format!("Failed to walk history: {}", e))?;
            let commit = info
                .object()
                .map_err(|e| format!("Failed to find commit {}: {}", info.id, e))?;

            let Some(current) = self.blob_id(&commit, relative)? else {
                continue;
            };

            let previous = match info.parent_ids().next() {
                Some(parent_id) => {
                    let parent = self
                        .repo
                        .find_commit(parent_id.detach())
                        .map_err(|e| format!("Failed to find commit {}: {}", parent_id, e))?;
                    self.blob_id(&parent, relative)?
                }
                None => None,
            };

            if previous == Some(current) {
                continue;
            }

            let time = commit
                .time()
                .map_err(|e| format!("Failed to read commit time: {}", e))?;
            if let Some(date) = DateTime::from_timestamp(time.seconds, 0) {
                years.insert(date.year());
            }
        }

        Ok(years)
    }
}

impl RevisionHistory for GitHistory {
    fn modification_years(&self, path: &Path) -> Result<BTreeSet<i32>> {
        let unavailable = |message: String| CodetoolsError::RevisionHistoryUnavailable {
            path: path.to_path_buf(),
            message,
        };

        let relative = repo_relative(&self.root, path).map_err(|e| unavailable(e.to_string()))?;
        self.collect_years(&relative).map_err(unavailable)
    }
}

/// List the files tracked at HEAD under `folder`.
///
/// Paths are returned relative to `folder`, sorted.
pub fn tracked_files(folder: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let folder = folder.as_ref();
    let (repo, root) = open_repo(folder)?;

    let tree = repo
        .head_commit()
        .map_err(|e| CodetoolsError::GitError(format!("Failed to get HEAD commit: {}", e)))?
        .tree()
        .map_err(|e| CodetoolsError::GitError(format!("Failed to get HEAD tree: {}", e)))?;

    let mut entries = Vec::new();
    collect_tree_entries(&repo, &tree, PathBuf::new(), &mut entries)?;

    let prefix = repo_relative(&root, folder)?;
    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .filter_map(|p| p.strip_prefix(&prefix).ok().map(Path::to_path_buf))
        .collect();
    files.sort();

    Ok(files)
}

/// Recursively collect all blob paths from a tree
fn collect_tree_entries(
    repo: &gix::Repository,
    tree: &gix::Tree<'_>,
    prefix: PathBuf,
    entries: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in tree.iter() {
        let entry = entry
            .map_err(|e| CodetoolsError::GitError(format!("Failed to read tree entry: {}", e)))?;

        let name = gix::path::from_bstr(entry.filename());
        let path = prefix.join(name);

        if entry.mode().is_blob() {
            entries.push(path);
        } else if entry.mode().is_tree() {
            let subtree = repo
                .find_object(entry.oid())
                .map_err(|e| CodetoolsError::GitError(format!("Failed to find tree: {}", e)))?
                .try_into_tree()
                .map_err(|_| CodetoolsError::GitError("Object is not a tree".to_string()))?;
            collect_tree_entries(repo, &subtree, path, entries)?;
        }
    }
    Ok(())
}
