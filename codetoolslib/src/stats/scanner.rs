//! Line-by-line comment scanner.
//!
//! Classifies every line of a file as code, comment or blank using the
//! language's [`CommentSyntax`], carrying a single `in_block_comment` flag
//! from one line to the next.
//!
//! This is a best-effort classifier, not a lexer: comment markers inside
//! string literals, nested block comments and line continuations are not
//! modeled.
//!
//! ## Block comment rules
//!
//! A line is classified against the state it *begins* in, and the state for
//! the next line is updated afterwards:
//!
//! - Delimited markers (`/*`..`*/`, `<!--`..`-->`): the last open and last
//!   close marker on the line decide. A close after the last open ends the
//!   block; an open with no close after it starts one. A line that starts a
//!   block, or that is still inside one, is a comment in its entirety, even
//!   when code shares the line with the marker.
//! - Toggle markers (`"""`): an odd number of tokens flips the state. A line
//!   that is inside a block, or that begins with the token, is a comment.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use crate::language::{BlockComment, CommentSyntax, Language};

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    Code,
    Comment,
    Blank,
}

/// Aggregate line counts for a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    pub code: u64,
    pub comment: u64,
    pub blank: u64,
}

impl LineCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of lines.
    pub fn total(&self) -> u64 {
        self.code + self.comment + self.blank
    }

    /// Count one classified line.
    pub fn record(&mut self, line_type: LineType) {
        match line_type {
            LineType::Code => self.code += 1,
            LineType::Comment => self.comment += 1,
            LineType::Blank => self.blank += 1,
        }
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            code: self.code + other.code,
            comment: self.comment + other.comment,
            blank: self.blank + other.blank,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        self.code += other.code;
        self.comment += other.comment;
        self.blank += other.blank;
    }
}

/// Result of a multi-line marker check on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockToken {
    Start,
    End,
    None,
}

fn delimited_token(line: &str, open: &str, close: &str) -> BlockToken {
    match (line.rfind(open), line.rfind(close)) {
        (Some(_), None) => BlockToken::Start,
        (None, Some(_)) => BlockToken::End,
        (Some(start), Some(end)) if start > end => BlockToken::Start,
        (Some(_), Some(_)) => BlockToken::End,
        (None, None) => BlockToken::None,
    }
}

/// Stateful classifier for the lines of one file.
#[derive(Debug, Clone)]
pub struct LineScanner {
    syntax: Option<&'static CommentSyntax>,
    in_block_comment: bool,
}

impl LineScanner {
    /// Create a scanner using the comment rules of `language`.
    ///
    /// Languages without comment syntax classify every non-blank line as code.
    pub fn new(language: Language) -> Self {
        Self {
            syntax: language.syntax(),
            in_block_comment: false,
        }
    }

    /// Whether the next line starts inside a block comment.
    pub fn in_block_comment(&self) -> bool {
        self.in_block_comment
    }

    /// Classify the next line and advance the block comment state.
    pub fn classify(&mut self, line: &str) -> LineType {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineType::Blank;
        }

        let Some(syntax) = self.syntax else {
            return LineType::Code;
        };

        let was_in_block = self.in_block_comment;
        let mut opens_block = false;

        match syntax.block_comment {
            Some(BlockComment::Delimited { open, close }) => {
                match delimited_token(trimmed, open, close) {
                    BlockToken::Start => {
                        opens_block = true;
                        self.in_block_comment = true;
                    }
                    BlockToken::End => self.in_block_comment = false,
                    BlockToken::None => {}
                }
            }
            Some(BlockComment::Toggle(token)) => {
                let count = trimmed.matches(token).count();
                opens_block = !was_in_block && trimmed.starts_with(token);
                if count % 2 == 1 {
                    self.in_block_comment = !self.in_block_comment;
                }
            }
            None => {}
        }

        if was_in_block || opens_block || syntax.is_single_line_comment(trimmed) {
            LineType::Comment
        } else {
            LineType::Code
        }
    }
}

/// Classify every line of `content`.
///
/// # Example
///
/// ```rust
/// use codetoolslib::{scan, Language, LineType};
///
/// let lines = scan("// a\n\n/* b\nc */\nint x;\n", Language::C);
/// assert_eq!(
///     lines,
///     vec![
///         LineType::Comment,
///         LineType::Blank,
///         LineType::Comment,
///         LineType::Comment,
///         LineType::Code,
///     ]
/// );
/// ```
pub fn scan(content: &str, language: Language) -> Vec<LineType> {
    let mut scanner = LineScanner::new(language);
    content.lines().map(|line| scanner.classify(line)).collect()
}

/// Count code, comment and blank lines in `content`.
pub fn count_lines(content: &str, language: Language) -> LineCounts {
    let mut scanner = LineScanner::new(language);
    let mut counts = LineCounts::new();
    for line in content.lines() {
        counts.record(scanner.classify(line));
    }
    counts
}
