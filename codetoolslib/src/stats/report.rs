//! Folder-level line statistics.
//!
//! Files are tagged as code, test or documentation, scanned line by line, and
//! aggregated per language. Test files report their code lines in a separate
//! bucket; comment and blank lines are pooled whatever the file type.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CodetoolsError;
use crate::language::{classify, Language};
use crate::source::filter::{any_match, compile_glob, discover_files, FilterConfig};
use crate::source::git::tracked_files;
use crate::Result;

use super::scanner::{count_lines, LineCounts};

/// Default name of the stats configuration file.
pub const STATS_CONFIG_FILE: &str = ".codestats.json";

/// Basenames that are always tests: `test_*` and `*.test` / `*.test.*`.
static TEST_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(test_.+|.+\.test(\..+)?)$").expect("test name pattern is a valid regex")
});

/// Role of a file in its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Code,
    Test,
    Doc,
}

/// Glob patterns that tag files, as stored in `.codestats.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub test_patterns: Vec<String>,
    pub doc_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl StatsConfig {
    /// Load `.codestats.json` from `folder`, or defaults if it is absent.
    pub fn load(folder: impl AsRef<Path>) -> Result<Self> {
        let path = folder.as_ref().join(STATS_CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
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
}

/// Compiled tagging rules.
#[derive(Debug, Clone, Default)]
pub struct FileTypeRules {
    test: Vec<Pattern>,
    doc: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

fn compile_all(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns.iter().map(|p| compile_glob(p)).collect()
}

impl FileTypeRules {
    pub fn from_config(config: &StatsConfig) -> Result<Self> {
        Ok(Self {
            test: compile_all(&config.test_patterns)?,
            doc: compile_all(&config.doc_patterns)?,
            exclude: compile_all(&config.exclude_patterns)?,
        })
    }

    /// Whether the path is excluded from the report.
    pub fn is_excluded(&self, path: &Path) -> bool {
        any_match(&self.exclude, path)
    }

    /// Tag a file as test, documentation or code.
    pub fn file_type(&self, path: &Path) -> FileType {
        if any_match(&self.test, path) {
            return FileType::Test;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if TEST_NAME.is_match(name) {
            return FileType::Test;
        }

        if any_match(&self.doc, path) {
            return FileType::Doc;
        }

        FileType::Code
    }
}

/// Statistics for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the scanned folder.
    pub path: PathBuf,
    pub language: Language,
    pub file_type: FileType,
    pub lines: LineCounts,
}

/// Per-language totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub language: Language,
    /// Code lines in non-test files
    pub code: u64,
    /// Code lines in test files
    pub test: u64,
    pub comment: u64,
    pub blank: u64,
}

impl LanguageSummary {
    fn new(language: Language) -> Self {
        Self {
            language,
            code: 0,
            test: 0,
            comment: 0,
            blank: 0,
        }
    }

    fn add_file(&mut self, file: &FileReport) {
        if file.file_type == FileType::Test {
            self.test += file.lines.code;
        } else {
            self.code += file.lines.code;
        }
        self.comment += file.lines.comment;
        self.blank += file.lines.blank;
    }
}

/// Totals across every language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotal {
    pub code: u64,
    pub test: u64,
    pub comment: u64,
    pub blank: u64,
}

/// Result of scanning a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolderReport {
    /// Scanned files, sorted by path
    pub files: Vec<FileReport>,
    /// Files that could not be classified or read
    pub skipped: Vec<PathBuf>,
}

impl FolderReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-language summaries, sorted by language name.
    pub fn summary(&self) -> Vec<LanguageSummary> {
        let mut by_language: BTreeMap<&'static str, LanguageSummary> = BTreeMap::new();

        for file in &self.files {
            by_language
                .entry(file.language.name())
                .or_insert_with(|| LanguageSummary::new(file.language))
                .add_file(file);
        }

        by_language.into_values().collect()
    }

    /// Totals across every language.
    pub fn total(&self) -> SummaryTotal {
        self.summary()
            .iter()
            .fold(SummaryTotal::default(), |mut acc, s| {
                acc.code += s.code;
                acc.test += s.test;
                acc.comment += s.comment;
                acc.blank += s.blank;
                acc
            })
    }
}

/// Where to take the list of files from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSource {
    /// Files tracked at HEAD in the enclosing git repository
    #[default]
    Git,
    /// Every file found by walking the folder
    Walk,
}

/// Scan a single file, relative to `root`.
pub fn scan_file(root: &Path, relative: &Path, rules: &FileTypeRules) -> Result<FileReport> {
    let language = classify(relative)?;
    let file_type = rules.file_type(relative);

    let path = root.join(relative);
    let content = fs::read_to_string(&path).map_err(|e| CodetoolsError::FileRead {
        path: path.clone(),
        source: e,
    })?;

    Ok(FileReport {
        path: relative.to_path_buf(),
        language,
        file_type,
        lines: count_lines(&content, language),
    })
}

/// Scan every file in a folder.
///
/// Files that cannot be classified or read are recorded in
/// [`FolderReport::skipped`] and do not abort the scan.
///
/// # Example
///
/// ```rust
/// use codetoolslib::{scan_folder, FileSource, StatsConfig};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("main.c"), "// entry\nint main() {}\n").unwrap();
/// fs::write(dir.path().join("notes.xyz"), "???\n").unwrap();
///
/// let report = scan_folder(dir.path(), FileSource::Walk, &StatsConfig::default()).unwrap();
/// assert_eq!(report.files.len(), 1);
/// assert_eq!(report.skipped.len(), 1);
/// assert_eq!(report.total().comment, 1);
/// ```
pub fn scan_folder(
    folder: impl AsRef<Path>,
    source: FileSource,
    config: &StatsConfig,
) -> Result<FolderReport> {
    let folder = folder.as_ref();

    if !folder.is_dir() {
        return Err(CodetoolsError::PathNotFound(folder.to_path_buf()));
    }

    let rules = FileTypeRules::from_config(config)?;

    let files = match source {
        FileSource::Git => tracked_files(folder)?,
        FileSource::Walk => discover_files(folder, &FilterConfig::new())?,
    };

    let mut report = FolderReport::new();

    for relative in files {
        if rules.is_excluded(&relative) {
            tracing::debug!("Excluded {}", relative.display());
            continue;
        }

        match scan_file(folder, &relative, &rules) {
            Ok(file_report) => report.files.push(file_report),
            Err(e) => {
                tracing::debug!("Skipping {}: {}", relative.display(), e);
                report.skipped.push(relative);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rules(test: &[&str], doc: &[&str]) -> FileTypeRules {
        FileTypeRules::from_config(&StatsConfig {
            test_patterns: test.iter().map(|s| s.to_string()).collect(),
            doc_patterns: doc.iter().map(|s| s.to_string()).collect(),
            exclude_patterns: Vec::new(),
        })
        .unwrap()
    }

    fn file(language: Language, file_type: FileType, code: u64, comment: u64, blank: u64) -> FileReport {
        FileReport {
            path: PathBuf::from("x"),
            language,
            file_type,
            lines: LineCounts {
                code,
                comment,
                blank,
            },
        }
    }

    #[test]
    fn test_fallback_test_names() {
        let rules = FileTypeRules::default();

        assert_eq!(rules.file_type(Path::new("tests/test_parser.py")), FileType::Test);
        assert_eq!(rules.file_type(Path::new("src/app.test.ts")), FileType::Test);
        assert_eq!(rules.file_type(Path::new("src/app.test")), FileType::Test);
        assert_eq!(rules.file_type(Path::new("src/test_")), FileType::Code);
        assert_eq!(rules.file_type(Path::new("src/contest.py")), FileType::Code);
        assert_eq!(rules.file_type(Path::new("src/app.ts")), FileType::Code);
    }

    #[test]
    fn test_configured_patterns() {
        let rules = rules(&["checks/*"], &["docs/*"]);

        assert_eq!(rules.file_type(Path::new("checks/parser.js")), FileType::Test);
        assert_eq!(rules.file_type(Path::new("docs/conf.py")), FileType::Doc);
        assert_eq!(rules.file_type(Path::new("src/main.c")), FileType::Code);
    }

    #[test]
    fn test_test_takes_priority_over_doc() {
        let rules = rules(&[], &["docs/*"]);
        assert_eq!(rules.file_type(Path::new("docs/test_build.py")), FileType::Test);
    }

    #[test]
    fn test_summary_pools_comments_and_blanks() {
        let report = FolderReport {
            files: vec![
                file(Language::Python, FileType::Code, 10, 2, 1),
                file(Language::Python, FileType::Test, 5, 3, 4),
                file(Language::Python, FileType::Doc, 1, 1, 1),
                file(Language::C, FileType::Code, 7, 0, 0),
            ],
            skipped: Vec::new(),
        };

        let summary = report.summary();
        assert_eq!(summary.len(), 2);

        // Sorted by name: "C" before "Python"
        assert_eq!(summary[0].language, Language::C);
        let python = summary[1];
        assert_eq!(python.code, 11);
        assert_eq!(python.test, 5);
        assert_eq!(python.comment, 6);
        assert_eq!(python.blank, 6);

        let total = report.total();
        assert_eq!(total.code, 18);
        assert_eq!(total.test, 5);
        assert_eq!(total.comment, 6);
        assert_eq!(total.blank, 6);
    }

    #[test]
    fn test_scan_folder_walk() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("tests")).unwrap();
        fs::write(root.join("src/main.c"), "// a\n\n/* b\nc */\nint x;\n").unwrap();
        fs::write(root.join("tests/test_main.py"), "# t\nassert True\n").unwrap();
        fs::write(root.join("src/data.bin"), "xx").unwrap();

        let report = scan_folder(root, FileSource::Walk, &StatsConfig::default()).unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.skipped, vec![PathBuf::from("src/data.bin")]);

        let c = report
            .files
            .iter()
            .find(|f| f.language == Language::C)
            .unwrap();
        assert_eq!(c.path, PathBuf::from("src/main.c"));
        assert_eq!(c.lines.code, 1);
        assert_eq!(c.lines.comment, 3);
        assert_eq!(c.lines.blank, 1);

        let total = report.total();
        assert_eq!(total.code, 1);
        assert_eq!(total.test, 1);
        assert_eq!(total.comment, 4);
    }

    #[test]
    fn test_scan_folder_excludes() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::write(root.join("main.c"), "int x;\n").unwrap();
        fs::write(root.join("vendor/lib.c"), "int y;\n").unwrap();

        let config = StatsConfig {
            exclude_patterns: vec!["vendor/*".to_string()],
            ..Default::default()
        };
        let report = scan_folder(root, FileSource::Walk, &config).unwrap();

        assert_eq!(report.files.len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_scan_folder_missing() {
        let result = scan_folder(
            "/nonexistent/folder",
            FileSource::Walk,
            &StatsConfig::default(),
        );
        assert!(matches!(result, Err(CodetoolsError::PathNotFound(_))));
    }

    #[test]
    fn test_stats_config_load() {
        let temp = tempdir().unwrap();
        assert_eq!(StatsConfig::load(temp.path()).unwrap(), StatsConfig::default());

        fs::write(
            temp.path().join(STATS_CONFIG_FILE),
            r#"{"test_patterns": ["checks/*"]}"#,
        )
        .unwrap();
        let config = StatsConfig::load(temp.path()).unwrap();
        assert_eq!(config.test_patterns, vec!["checks/*"]);
        assert!(config.doc_patterns.is_empty());

        fs::write(temp.path().join(STATS_CONFIG_FILE), "{ nope").unwrap();
        assert!(matches!(
            StatsConfig::load(temp.path()),
            Err(CodetoolsError::MalformedConfig { .. })
        ));
    }
}
