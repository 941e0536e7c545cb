//! Banner rendering.
//!
//! A banner is a block of line comments at the top of a file:
//!
//! ```text
//! #    tool.py
//! #        Entry point of the tool.
//! #
//! #   - Author : Jane Doe
//! #   - License : MIT
//! #   - Project : Tools (tools-repo)
//! #
//! #   Copyright (c) 2021-2024 ACME
//! ```
//!
//! Only languages with a line-comment marker can carry a banner.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Datelike;

use crate::error::CodetoolsError;
use crate::language::{CommentSyntax, Language};
use crate::Result;

use super::config::{resolve_name, BannerConfig, FileEntry, NameRole};

/// Column limit for description lines.
pub const WRAP_WIDTH: usize = 80;

const TITLE_INDENT: &str = "    ";
const DESCRIPTION_INDENT: &str = "        ";

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Comment rules for a language that can carry a banner.
pub fn banner_syntax(language: Language, path: &Path) -> Result<&'static CommentSyntax> {
    language
        .syntax()
        .filter(|syntax| syntax.line_comment.is_some())
        .ok_or_else(|| CodetoolsError::UnknownLanguage(path.to_path_buf()))
}

/// Project-wide banner fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerSpec {
    pub project: String,
    pub repo: String,
    pub license: String,
    pub copyright_owner: String,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub authors: BTreeMap<String, String>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&BannerConfig> for BannerSpec {
    fn from(config: &BannerConfig) -> Self {
        Self {
            project: config.project.clone(),
            repo: config.repo.clone(),
            license: config.license.clone(),
            copyright_owner: config.copyright_owner.clone(),
            start_year: non_empty(&config.copyright_start_date),
            end_year: non_empty(&config.copyright_end_date),
            authors: config.authors.clone(),
        }
    }
}

/// A rendered banner, without line terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Interpreter line to put on line 1
    pub shebang: Option<String>,
    /// Comment lines
    pub lines: Vec<String>,
}

impl BannerSpec {
    /// Year expression for the copyright line.
    ///
    /// `fallback_year` stands in for a missing start year and is rendered
    /// alone.
    pub fn date_expression(&self, fallback_year: i32) -> String {
        match (self.start_year.as_deref(), self.end_year.as_deref()) {
            (Some(start), Some(end)) if start != end => format!("{}-{}", start, end),
            (Some(start), _) => start.to_string(),
            (None, _) => fallback_year.to_string(),
        }
    }

    /// Render the banner for one file.
    ///
    /// `path_key` is the file's key in the configuration; its basename is the
    /// banner title.
    pub fn render(
        &self,
        path_key: &str,
        entry: &FileEntry,
        language: Language,
        fallback_year: i32,
    ) -> Result<Banner> {
        let syntax = banner_syntax(language, Path::new(path_key))?;
        let marker = syntax.line_comment.unwrap_or_default();

        let basename = path_key.rsplit('/').next().unwrap_or(path_key);
        let mut body = vec![format!("{}{}", TITLE_INDENT, basename)];

        for line in wrap_description(&entry.docstring, WRAP_WIDTH) {
            body.push(format!("{}{}", DESCRIPTION_INDENT, line));
        }

        body.push(String::new());

        if let Some(id) = entry.author_id() {
            let name = resolve_name(&self.authors, id, path_key, NameRole::Author)?;
            body.push(format!("   - Author : {}", name));
        }

        if !entry.contributors.is_empty() {
            body.push("   - Contributors :".to_string());
            for id in &entry.contributors {
                let name = resolve_name(&self.authors, id, path_key, NameRole::Contributor)?;
                body.push(format!("       - {}", name));
            }
        }

        body.push(format!("   - License : {}", self.license));

        if self.repo.is_empty() {
            body.push(format!("   - Project : {}", self.project));
        } else {
            body.push(format!("   - Project : {} ({})", self.project, self.repo));
        }

        body.push(String::new());
        body.push(format!(
            "   Copyright (c) {} {}",
            self.date_expression(fallback_year),
            self.copyright_owner
        ));

        let lines = body
            .into_iter()
            .map(|text| format!("{}{}", marker, text).trim_end().to_string())
            .collect();

        let shebang = if entry.add_shebang {
            syntax.shebang.map(str::to_string)
        } else {
            None
        };

        Ok(Banner { shebang, lines })
    }
}

/// Byte offset of the whitespace to break `text` at, if it is too long.
fn break_point(text: &str, width: usize) -> Option<usize> {
    if text.chars().count() <= width {
        return None;
    }

    let mut last_fit = None;
    for (column, (offset, ch)) in text.char_indices().enumerate() {
        if column > width {
            if last_fit.is_some() {
                break;
            }
            if ch.is_whitespace() {
                return Some(offset);
            }
        } else if ch.is_whitespace() && column > 0 {
            last_fit = Some(offset);
        }
    }
    last_fit
}

/// Word-wrap a description to `width` columns.
///
/// Lines break at the last whitespace at or before the limit, or at the first
/// whitespace after it when a single word is longer than the limit. Explicit
/// newlines are kept. Every produced line is trimmed.
pub fn wrap_description(text: &str, width: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut rest = paragraph.trim();

        while let Some(offset) = break_point(rest, width) {
            lines.push(rest[..offset].trim_end().to_string());
            rest = rest[offset..].trim_start();
        }

        lines.push(rest.to_string());
    }

    lines
}
