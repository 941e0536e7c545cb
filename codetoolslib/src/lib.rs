//! # codetoolslib
//!
//! Library behind the `codebanner` and `codestats` developer tools.
//!
//! ## Overview
//!
//! Both tools start from the same place: a file name decides the
//! [`Language`], and the language decides the [`CommentSyntax`]. From there:
//!
//! - **Banners**: the header comment block of each configured file is located
//!   and replaced with a freshly rendered copyright banner, leaving the rest of
//!   the file byte for byte intact
//! - **Statistics**: every line is classified as code, comment or blank, and
//!   counts are aggregated per language with test files reported separately
//!
//! ## Features
//!
//! - **Table-driven languages**: comment markers, shebangs and preserved
//!   directives live in one lookup table
//! - **Idempotent rewrites**: running the banner writer twice changes nothing
//! - **Git aware**: tracked files and per-file modification years read via gix
//! - **Pure data types**: functions return structured data; only the banner
//!   writer touches files, and it replaces them atomically
//!
//! ## Example
//!
//! ```rust
//! use codetoolslib::{classify, count_lines, Language};
//!
//! let language = classify("src/main.cpp").unwrap();
//! assert_eq!(language, Language::Cpp);
//!
//! let counts = count_lines("// a\n\n/* b\nc */\nint x;\n", language);
//! assert_eq!((counts.code, counts.comment, counts.blank), (1, 3, 1));
//!
//! assert!(classify("notes.xyz").is_err());
//! ```

pub mod banner;
pub mod error;
pub mod language;
pub mod output;
pub mod persist;
pub mod source;
pub mod stats;

pub use banner::{BannerConfig, BannerSpec, FileEntry, UpdateMode, WriteOptions, WriteReport};
pub use error::CodetoolsError;
pub use language::{classify, BlockComment, CommentSyntax, Language};
pub use output::{StatsTable, TableRow};
pub use source::{discover_files, tracked_files, FilterConfig, GitHistory, RevisionHistory};
pub use stats::{
    count_lines, scan, scan_folder, FileReport, FileSource, FileType, FolderReport, LineCounts,
    LineType, StatsConfig,
};

/// Result type for codetoolslib operations
pub type Result<T> = std::result::Result<T, CodetoolsError>;
