//! Source file banners.
//!
//! - [`config`]: the `.codebanner.json` record and file discovery
//! - [`render`]: turns the configuration into comment lines for one file
//! - [`rewrite`]: finds the existing header of a file and replaces it
//! - [`writer`]: applies the rewrite to every configured file
//!
//! ## Example
//!
//! ```rust
//! use codetoolslib::banner::{write_files, BannerConfig, FileEntry, WriteOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("tool.sh"), "# old\necho hi\n").unwrap();
//!
//! let mut config = BannerConfig::initial(2024);
//! config.project = "Tools".to_string();
//! config.files.insert("tool.sh".to_string(), FileEntry::default());
//!
//! let report = write_files(dir.path(), &config, &WriteOptions::new(2024)).unwrap();
//! assert_eq!(report.written, vec!["tool.sh"]);
//!
//! let content = fs::read_to_string(dir.path().join("tool.sh")).unwrap();
//! assert!(content.starts_with("#    tool.sh\n"));
//! assert!(content.ends_with("\necho hi\n"));
//! ```

pub mod config;
pub mod render;
pub mod rewrite;
pub mod writer;

pub use config::{
    resolve_name, BannerConfig, FileEntry, NameRole, UpdateMode, DEFAULT_CONFIG_FILE,
};
pub use render::{banner_syntax, current_year, wrap_description, Banner, BannerSpec, WRAP_WIDTH};
pub use rewrite::{rewrite, HeaderRegion};
pub use writer::{write_files, SkippedFile, WriteOptions, WriteReport};
