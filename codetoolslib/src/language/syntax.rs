//! Per-language comment syntax table.
//!
//! Both the banner rewriter and the line scanner consult this table instead
//! of branching on the language, so adding a language only means adding a
//! row here.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::Language;

/// How a language spells comments that span several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockComment {
    /// Distinct open and close markers, e.g. `/*` and `*/`.
    Delimited {
        open: &'static str,
        close: &'static str,
    },
    /// A single token that alternately opens and closes, e.g. `"""`.
    Toggle(&'static str),
}

/// Comment rules for one language.
#[derive(Debug)]
pub struct CommentSyntax {
    /// Marker that starts a single-line comment (`//`, `#`).
    pub line_comment: Option<&'static str>,
    /// Multi-line comment markers.
    pub block_comment: Option<BlockComment>,
    /// Interpreter line emitted when a banner asks for a shebang.
    pub shebang: Option<&'static str>,
    /// Lines kept verbatim above the banner (tooling directives).
    pub skip_patterns: Vec<Regex>,
}

const C_BLOCK: BlockComment = BlockComment::Delimited {
    open: "/*",
    close: "*/",
};

const PYTHON_SKIP: &[&str] = &[
    r"^#\s*(type|mypy|pyright)\s*:",
    r"^#.*coding[:=]\s*[-\w.]+",
];

const SCRIPT_SKIP: &[&str] = &[r"^//\s*@ts-(no)?check\b", r"^///\s*<reference\b"];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("built-in skip pattern is a valid regex"))
        .collect()
}

fn slash(shebang: Option<&'static str>, skip: &[&str]) -> CommentSyntax {
    CommentSyntax {
        line_comment: Some("//"),
        block_comment: Some(C_BLOCK),
        shebang,
        skip_patterns: compile(skip),
    }
}

fn hash(
    block: Option<BlockComment>,
    shebang: Option<&'static str>,
    skip: &[&str],
) -> CommentSyntax {
    CommentSyntax {
        line_comment: Some("#"),
        block_comment: block,
        shebang,
        skip_patterns: compile(skip),
    }
}

static TABLE: LazyLock<HashMap<Language, CommentSyntax>> = LazyLock::new(|| {
    HashMap::from([
        (Language::C, slash(None, &[])),
        (Language::Cpp, slash(None, &[])),
        (Language::Jenkins, slash(None, &[])),
        (
            Language::JavaScript,
            slash(Some("#!/usr/bin/env node"), SCRIPT_SKIP),
        ),
        (Language::TypeScript, slash(None, SCRIPT_SKIP)),
        (
            Language::Python,
            hash(
                Some(BlockComment::Toggle("\"\"\"")),
                Some("#!/usr/bin/env python3"),
                PYTHON_SKIP,
            ),
        ),
        (Language::Bash, hash(None, Some("#!/usr/bin/env bash"), &[])),
        (Language::CMake, hash(None, None, &[])),
        (Language::Docker, hash(None, None, &[])),
        (
            Language::Css,
            CommentSyntax {
                line_comment: None,
                block_comment: Some(C_BLOCK),
                shebang: None,
                skip_patterns: Vec::new(),
            },
        ),
        (
            Language::Html,
            CommentSyntax {
                line_comment: None,
                block_comment: Some(BlockComment::Delimited {
                    open: "<!--",
                    close: "-->",
                }),
                shebang: None,
                skip_patterns: Vec::new(),
            },
        ),
    ])
});

/// Look up the comment rules registered for a language.
pub fn lookup(language: Language) -> Option<&'static CommentSyntax> {
    TABLE.get(&language)
}

impl CommentSyntax {
    /// Whether the line is a tooling directive to keep above the banner.
    pub fn is_skip_line(&self, line: &str) -> bool {
        self.skip_patterns.iter().any(|re| re.is_match(line))
    }

    /// Whether the line starts (after indentation) with the line-comment marker.
    pub fn is_line_comment(&self, line: &str) -> bool {
        self.line_comment
            .is_some_and(|marker| line.trim_start().starts_with(marker))
    }

    /// Whether the whole (trimmed) line is a comment on its own: a line
    /// comment, or a block comment opened and closed on the same line.
    pub fn is_single_line_comment(&self, trimmed: &str) -> bool {
        if self.is_line_comment(trimmed) {
            return true;
        }
        match self.block_comment {
            Some(BlockComment::Delimited { open, close }) => {
                trimmed.len() >= open.len() + close.len()
                    && trimmed.starts_with(open)
                    && trimmed.ends_with(close)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_by_family() {
        for lang in [
            Language::C,
            Language::Cpp,
            Language::JavaScript,
            Language::TypeScript,
            Language::Jenkins,
        ] {
            assert_eq!(lang.syntax().unwrap().line_comment, Some("//"), "{}", lang);
        }
        for lang in [
            Language::Python,
            Language::Bash,
            Language::CMake,
            Language::Docker,
        ] {
            assert_eq!(lang.syntax().unwrap().line_comment, Some("#"), "{}", lang);
        }
    }

    #[test]
    fn test_languages_without_comments() {
        assert!(Language::Json.syntax().is_none());
        assert!(Language::Markdown.syntax().is_none());
        assert!(Language::Batchfile.syntax().is_none());
        assert!(Language::Css.syntax().unwrap().line_comment.is_none());
        assert!(Language::Html.syntax().unwrap().line_comment.is_none());
    }

    #[test]
    fn test_shebang_templates() {
        assert_eq!(
            Language::Python.syntax().unwrap().shebang,
            Some("#!/usr/bin/env python3")
        );
        assert_eq!(
            Language::Bash.syntax().unwrap().shebang,
            Some("#!/usr/bin/env bash")
        );
        assert!(Language::Cpp.syntax().unwrap().shebang.is_none());
    }

    #[test]
    fn test_skip_patterns() {
        let python = Language::Python.syntax().unwrap();
        assert!(python.is_skip_line("# type: ignore"));
        assert!(python.is_skip_line("# mypy: disable-error-code=\"misc\""));
        assert!(python.is_skip_line("# -*- coding: utf-8 -*-"));
        assert!(!python.is_skip_line("# a regular comment"));

        let ts = Language::TypeScript.syntax().unwrap();
        assert!(ts.is_skip_line("// @ts-nocheck"));
        assert!(ts.is_skip_line("/// <reference types=\"node\" />"));
        assert!(!ts.is_skip_line("// @ts-expect-error"));

        assert!(!Language::Cpp.syntax().unwrap().is_skip_line("// @ts-check"));
    }

    #[test]
    fn test_single_line_comment() {
        let c = Language::C.syntax().unwrap();
        assert!(c.is_single_line_comment("// a"));
        assert!(c.is_single_line_comment("//"));
        assert!(c.is_single_line_comment("/* a */"));
        assert!(!c.is_single_line_comment("/* a"));
        assert!(!c.is_single_line_comment("/*/"));
        assert!(!c.is_single_line_comment("int x; // trailing"));

        let html = Language::Html.syntax().unwrap();
        assert!(html.is_single_line_comment("<!-- note -->"));
        assert!(!html.is_single_line_comment("<p>text</p>"));
    }
}
