//! Language detection from file names.
//!
//! A file's [`Language`] decides which comment rules apply to it, both when
//! counting lines and when rewriting its banner. Detection looks only at the
//! file name:
//!
//! 1. Exact basename matches (`CMakeLists.txt`, `Dockerfile`, `Jenkinsfile`)
//! 2. Case-insensitive extension matches
//!
//! The comment rules themselves live in a lookup table, see [`syntax`].

pub mod syntax;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodetoolsError;
use crate::Result;

pub use syntax::{BlockComment, CommentSyntax};

/// Languages recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "TypeScript")]
    TypeScript,
    #[serde(rename = "Python")]
    Python,
    #[serde(rename = "JavaScript")]
    JavaScript,
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "CSS")]
    Css,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "CMake")]
    CMake,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "Markdown")]
    Markdown,
    #[serde(rename = "Jenkins")]
    Jenkins,
    #[serde(rename = "Docker")]
    Docker,
    #[serde(rename = "Bash")]
    Bash,
    #[serde(rename = "Batchfile")]
    Batchfile,
}

/// Basenames that identify a language regardless of extension.
const BASENAME_RULES: &[(&str, Language)] = &[
    ("CMakeLists.txt", Language::CMake),
    ("Dockerfile", Language::Docker),
    ("Jenkinsfile", Language::Jenkins),
];

/// Lowercase extensions (without the dot) mapped to their language.
const EXTENSION_RULES: &[(&str, Language)] = &[
    ("ts", Language::TypeScript),
    ("c", Language::C),
    ("h", Language::C),
    ("cpp", Language::Cpp),
    ("hpp", Language::Cpp),
    ("py", Language::Python),
    ("pyi", Language::Python),
    ("js", Language::JavaScript),
    ("cjs", Language::JavaScript),
    ("html", Language::Html),
    ("htm", Language::Html),
    ("md", Language::Markdown),
    ("json", Language::Json),
    ("sh", Language::Bash),
    ("bash", Language::Bash),
    ("css", Language::Css),
    ("cmake", Language::CMake),
    ("bat", Language::Batchfile),
];

impl Language {
    /// Every supported language.
    pub const ALL: [Language; 14] = [
        Language::TypeScript,
        Language::Python,
        Language::JavaScript,
        Language::Html,
        Language::Css,
        Language::Cpp,
        Language::C,
        Language::CMake,
        Language::Json,
        Language::Markdown,
        Language::Jenkins,
        Language::Docker,
        Language::Bash,
        Language::Batchfile,
    ];

    /// Human-readable name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::CMake => "CMake",
            Language::Json => "JSON",
            Language::Markdown => "Markdown",
            Language::Jenkins => "Jenkins",
            Language::Docker => "Docker",
            Language::Bash => "Bash",
            Language::Batchfile => "Batchfile",
        }
    }

    /// Detect the language of a path, or `None` if no rule matches.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(basename) = path.file_name().and_then(|n| n.to_str()) {
            if let Some((_, lang)) = BASENAME_RULES.iter().find(|(name, _)| *name == basename) {
                return Some(*lang);
            }
        }

        let ext = path.extension()?.to_str()?.to_lowercase();
        EXTENSION_RULES
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, lang)| *lang)
    }

    /// Comment rules for this language, if it has any comment syntax at all.
    pub fn syntax(&self) -> Option<&'static CommentSyntax> {
        syntax::lookup(*self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a file by its name.
///
/// Fails with [`CodetoolsError::UnknownLanguage`] when neither the basename
/// nor the extension is recognized, so batch callers can skip the file.
///
/// # Example
///
/// ```rust
/// use codetoolslib::{classify, Language};
///
/// assert_eq!(classify("src/main.CPP").unwrap(), Language::Cpp);
/// assert_eq!(classify("tools/CMakeLists.txt").unwrap(), Language::CMake);
/// assert!(classify("notes.xyz").is_err());
/// ```
pub fn classify(path: impl AsRef<Path>) -> Result<Language> {
    let path = path.as_ref();
    Language::from_path(path).ok_or_else(|| CodetoolsError::UnknownLanguage(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_representative_file() {
        let samples = [
            ("app.ts", Language::TypeScript),
            ("tool.py", Language::Python),
            ("stubs.pyi", Language::Python),
            ("index.js", Language::JavaScript),
            ("config.cjs", Language::JavaScript),
            ("page.html", Language::Html),
            ("page.htm", Language::Html),
            ("style.css", Language::Css),
            ("main.cpp", Language::Cpp),
            ("main.hpp", Language::Cpp),
            ("main.c", Language::C),
            ("main.h", Language::C),
            ("CMakeLists.txt", Language::CMake),
            ("toolchain.cmake", Language::CMake),
            ("package.json", Language::Json),
            ("README.md", Language::Markdown),
            ("Jenkinsfile", Language::Jenkins),
            ("Dockerfile", Language::Docker),
            ("build.sh", Language::Bash),
            ("env.bash", Language::Bash),
            ("setup.bat", Language::Batchfile),
        ];

        for (file, expected) in samples {
            assert_eq!(classify(file).unwrap(), expected, "{}", file);
        }

        for lang in Language::ALL {
            assert!(
                samples.iter().any(|(_, l)| *l == lang),
                "no sample for {}",
                lang
            );
        }
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(classify("Main.CPP").unwrap(), Language::Cpp);
        assert_eq!(classify("script.Py").unwrap(), Language::Python);
        assert_eq!(classify("lib/Header.H").unwrap(), Language::C);
    }

    #[test]
    fn test_basename_takes_priority() {
        assert_eq!(classify("sub/dir/CMakeLists.txt").unwrap(), Language::CMake);
        assert!(classify("notes.txt").is_err());
    }

    #[test]
    fn test_basename_match_is_exact() {
        assert!(classify("dockerfile").is_err());
        assert!(classify("Dockerfile.dev").is_err());
    }

    #[test]
    fn test_unknown_extension() {
        let result = classify("data/archive.xyz");

        match result {
            Err(CodetoolsError::UnknownLanguage(path)) => {
                assert_eq!(path, Path::new("data/archive.xyz"));
            }
            other => panic!("Expected UnknownLanguage error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_extension() {
        assert!(classify("Makefile").is_err());
        assert!(Language::from_path("").is_none());
    }

    #[test]
    fn test_display_uses_report_name() {
        assert_eq!(Language::Cpp.to_string(), "C++");
        assert_eq!(Language::Html.to_string(), "HTML");
        assert_eq!(
            serde_json::to_string(&Language::Cpp).unwrap(),
            "\"C++\"".to_string()
        );
    }
}
