//! The `.codebanner.json` configuration record.
//!
//! A [`BannerConfig`] is loaded once per run and passed by reference to every
//! operation. Operations that change the file list return a new value, which
//! the caller persists with [`BannerConfig::save`].
//!
//! ## Example
//!
//! ```rust
//! use codetoolslib::banner::BannerConfig;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let config = BannerConfig::initial(2024);
//! config.save(dir.path(), ".codebanner.json").unwrap();
//!
//! let loaded = BannerConfig::load(dir.path(), ".codebanner.json", 2030).unwrap();
//! assert_eq!(loaded.copyright_start_date, "2024");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CodetoolsError;
use crate::persist::write_atomic;
use crate::source::filter::{discover_relative, FilterConfig};
use crate::Result;

/// Default configuration file name inside the work folder.
pub const DEFAULT_CONFIG_FILE: &str = ".codebanner.json";

/// Per-file banner options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntry {
    /// Free-text description rendered under the title
    pub docstring: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub add_shebang: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
}

impl FileEntry {
    /// Author identifier, if one is set and non-empty.
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_deref().filter(|id| !id.is_empty())
    }
}

/// How `scan` updates the `files` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Only list the discovered files
    #[default]
    No,
    /// Add newly discovered files
    Merge,
    /// Add new files and drop entries that were not discovered
    Full,
}

impl std::str::FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "no" => Ok(UpdateMode::No),
            "merge" => Ok(UpdateMode::Merge),
            "full" => Ok(UpdateMode::Full),
            other => Err(format!("unknown update mode '{}'", other)),
        }
    }
}

/// Banner configuration for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerConfig {
    /// Folders to scan, relative to the work folder (empty means the folder itself)
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub include_patterns: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    pub project: String,
    #[serde(default)]
    pub repo: String,
    pub license: String,
    pub copyright_owner: String,
    /// Empty when unknown
    #[serde(default)]
    pub copyright_start_date: String,
    /// Empty when unknown
    #[serde(default)]
    pub copyright_end_date: String,
    /// Per-file options keyed by forward-slash path relative to the work folder
    #[serde(default)]
    pub files: BTreeMap<String, FileEntry>,
    /// Identifier to full name
    #[serde(default)]
    pub authors: BTreeMap<String, String>,
}

fn config_path(folder: &Path, file_name: &str) -> Result<PathBuf> {
    if !folder.is_dir() {
        return Err(CodetoolsError::ConfigMissing(folder.to_path_buf()));
    }
    Ok(folder.join(file_name))
}

/// How an identifier is used in a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    Author,
    Contributor,
}

/// Full name of `id` in an authors table.
pub fn resolve_name<'a>(
    authors: &'a BTreeMap<String, String>,
    id: &str,
    file: &str,
    role: NameRole,
) -> Result<&'a str> {
    authors.get(id).map(String::as_str).ok_or_else(|| {
        let (id, file) = (id.to_string(), file.to_string());
        match role {
            NameRole::Author => CodetoolsError::UnknownAuthor { id, file },
            NameRole::Contributor => CodetoolsError::UnknownContributor { id, file },
        }
    })
}

impl BannerConfig {
    /// Configuration written by `init`.
    pub fn initial(current_year: i32) -> Self {
        Self {
            folders: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            project: String::new(),
            repo: String::new(),
            license: String::new(),
            copyright_owner: String::new(),
            copyright_start_date: current_year.to_string(),
            copyright_end_date: String::new(),
            files: BTreeMap::new(),
            authors: BTreeMap::new(),
        }
    }

    /// Load the configuration from `folder`.
    ///
    /// An absent file yields [`BannerConfig::initial`].
    pub fn load(folder: impl AsRef<Path>, file_name: &str, current_year: i32) -> Result<Self> {
        let path = config_path(folder.as_ref(), file_name)?;

        if !path.is_file() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::initial(current_year));
        }

        let content = fs::read_to_string(&path).map_err(|e| CodetoolsError::FileRead {
            path: path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| CodetoolsError::MalformedConfig {
            path,
            message: e.to_string(),
        })
    }

    /// Persist the configuration as 4-space indented JSON.
    pub fn save(&self, folder: impl AsRef<Path>, file_name: &str) -> Result<()> {
        let path = config_path(folder.as_ref(), file_name)?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| CodetoolsError::MalformedConfig {
                path: path.clone(),
                message: e.to_string(),
            })?;
        buf.push(b'\n');

        write_atomic(&path, &buf)
    }

    /// Discover the files selected by the folder and pattern settings.
    ///
    /// Returns forward-slash paths relative to `base`. With no include
    /// pattern nothing is selected.
    pub fn discover(&self, base: impl AsRef<Path>) -> Result<Vec<String>> {
        if self.include_patterns.is_empty() {
            tracing::warn!("No include patterns configured, no files selected");
            return Ok(Vec::new());
        }

        let filter = FilterConfig::new()
            .include_many(&self.include_patterns)?
            .exclude_many(&self.exclude_patterns)?;

        discover_relative(base.as_ref(), &self.folders, &filter)
    }

    /// A copy with `files` merged into the `files` map.
    ///
    /// New paths get an empty entry; existing entries are kept as they are.
    /// With `remove_missing`, entries whose path is not in `files` are dropped.
    pub fn merge_files(&self, files: &[String], remove_missing: bool) -> Self {
        let mut merged = self.clone();

        if remove_missing {
            merged.files.retain(|path, _| files.contains(path));
        }

        for file in files {
            merged.files.entry(file.clone()).or_default();
        }

        merged
    }

    /// Check that every author and contributor identifier resolves.
    pub fn validate_authors(&self) -> Result<()> {
        for (file, entry) in &self.files {
            if let Some(id) = entry.author_id() {
                resolve_name(&self.authors, id, file, NameRole::Author)?;
            }
            for id in &entry.contributors {
                resolve_name(&self.authors, id, file, NameRole::Contributor)?;
            }
        }
        Ok(())
    }
}
