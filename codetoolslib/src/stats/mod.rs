//! Line statistics: per-line classification and folder reports.
//!
//! - [`scanner`]: classifies each line of a file as code, comment or blank
//! - [`report`]: tags files as code/test/doc and aggregates counts per language

pub mod report;
pub mod scanner;

pub use report::{
    scan_file, scan_folder, FileReport, FileSource, FileType, FileTypeRules, FolderReport,
    LanguageSummary, StatsConfig, SummaryTotal, STATS_CONFIG_FILE,
};
pub use scanner::{count_lines, scan, LineCounts, LineScanner, LineType};
