//! Table-ready view of a folder report.
//!
//! `StatsTable` holds display strings only. Aggregation and ordering happen in
//! [`FolderReport::summary`]; this layer formats numbers and labels.

use serde::{Deserialize, Serialize};

use crate::stats::report::{FolderReport, LanguageSummary, SummaryTotal};

/// Column headers of the stats table.
pub const HEADERS: [&str; 5] = ["Language", "Code", "Test", "Comment", "Blank"];

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Language name, or "Total" for the footer
    pub label: String,
    /// Code, test, comment and blank counts, as strings
    pub values: Vec<String>,
}

/// Table-ready line statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTable {
    pub headers: Vec<String>,
    /// One row per language, sorted by name
    pub rows: Vec<TableRow>,
    pub footer: TableRow,
}

fn format_counts(code: u64, test: u64, comment: u64, blank: u64) -> Vec<String> {
    [code, test, comment, blank]
        .iter()
        .map(u64::to_string)
        .collect()
}

fn language_row(summary: &LanguageSummary) -> TableRow {
    TableRow {
        label: summary.language.name().to_string(),
        values: format_counts(summary.code, summary.test, summary.comment, summary.blank),
    }
}

fn total_row(total: &SummaryTotal) -> TableRow {
    TableRow {
        label: "Total".to_string(),
        values: format_counts(total.code, total.test, total.comment, total.blank),
    }
}

impl StatsTable {
    /// Build the table for a folder report.
    pub fn from_report(report: &FolderReport) -> Self {
        StatsTable {
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: report.summary().iter().map(language_row).collect(),
            footer: total_row(&report.total()),
        }
    }
}
