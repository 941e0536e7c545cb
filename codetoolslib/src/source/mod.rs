//! Source discovery: find files to analyze or rewrite.
//!
//! This module handles the first stage of both tools - deciding which files
//! to look at. It provides:
//!
//! - **File filtering**: Include/exclude files with glob patterns
//! - **Git listing**: Files tracked at HEAD
//! - **Revision history**: Years in which a file changed
//!
//! ## Example
//!
//! ```rust,ignore
//! use codetoolslib::source::{discover_relative, FilterConfig};
//!
//! let filter = FilterConfig::new().include("*.py")?.exclude("build")?;
//! let files = discover_relative(Path::new("."), &["src"], &filter)?;
//! ```

pub mod filter;
pub mod git;

pub use filter::{discover_files, discover_relative, to_slash, FilterConfig};
pub use git::{tracked_files, GitHistory, RevisionHistory};
