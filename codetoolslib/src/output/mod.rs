//! Output formatting: present line statistics as tables.
//!
//! - **StatsTable**: headers, one row per language, and a total footer
//! - **TableRow**: a label with its formatted values
//!
//! ## Example
//!
//! ```rust
//! use codetoolslib::output::StatsTable;
//! use codetoolslib::FolderReport;
//!
//! let table = StatsTable::from_report(&FolderReport::new());
//! assert_eq!(table.headers[0], "Language");
//! assert_eq!(table.footer.label, "Total");
//! ```

pub mod table;

pub use table::{StatsTable, TableRow, HEADERS};
