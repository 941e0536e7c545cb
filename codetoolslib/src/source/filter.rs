//! File filtering and discovery with glob pattern support.
//!
//! Patterns are matched both against a file's basename and against its path
//! relative to the folder being walked, so `*.py` selects Python files at any
//! depth while `lib/*.py` selects them under `lib/`. Exclude patterns also
//! prune whole directories whose name matches.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::CodetoolsError;
use crate::Result;

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

pub(crate) fn compile_glob(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| CodetoolsError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Whether any pattern matches the path or its basename.
pub(crate) fn any_match(patterns: &[Pattern], path: &Path) -> bool {
    let path_str = to_slash(path);
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    patterns
        .iter()
        .any(|p| p.matches(&path_str) || p.matches(name))
}

/// Render a path with forward slashes on every platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl FilterConfig {
    /// Create a new empty filter config (includes all files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile_glob(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile_glob(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Check if a relative path matches the filter criteria.
    ///
    /// A path matches if:
    /// 1. It doesn't match any exclude pattern
    /// 2. It matches at least one include pattern (or include is empty)
    pub fn matches(&self, path: &Path) -> bool {
        if any_match(&self.exclude, path) {
            return false;
        }

        self.include.is_empty() || any_match(&self.include, path)
    }

    /// Whether a directory should be pruned from the walk.
    fn skips_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.exclude.iter().any(|p| p.matches(name))
    }
}

/// Discover files under a directory.
///
/// Walks the directory tree and returns the paths, relative to `root`, of all
/// files that match the filter. Hidden directories are skipped.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(CodetoolsError::PathNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    if root.is_file() {
        let name = root.file_name().map(PathBuf::from).unwrap_or_default();
        if filter.matches(&name) {
            files.push(name);
        }
        return Ok(files);
    }

    let walker = WalkDir::new(root).follow_links(true).into_iter();

    for entry in walker.filter_entry(|e| {
        // Always include the root directory
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !filter.skips_dir(name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if filter.matches(relative) {
            files.push(relative.to_path_buf());
        }
    }

    // Sort for deterministic output
    files.sort();

    Ok(files)
}

/// Discover files in several folders under a common base.
///
/// Returns forward-slash paths relative to `base`, sorted and deduplicated.
/// An empty folder list scans `base` itself.
pub fn discover_relative<S: AsRef<str>>(
    base: &Path,
    folders: &[S],
    filter: &FilterConfig,
) -> Result<Vec<String>> {
    let folders: Vec<&str> = if folders.is_empty() {
        vec!["."]
    } else {
        folders.iter().map(|f| f.as_ref()).collect()
    };

    let mut all_files = Vec::new();

    for folder in folders {
        let dir = base.join(folder);
        for file in discover_files(&dir, filter)? {
            let relative = Path::new(folder).join(file);
            all_files.push(to_slash(&relative));
        }
    }

    // Remove duplicates and sort
    all_files.sort();
    all_files.dedup();

    Ok(all_files)
}
