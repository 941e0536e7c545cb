//! Plain-text rendering of stats tables.

use codetoolslib::output::{StatsTable, TableRow};
use console::Style;

/// Spaces between columns.
const COLUMN_GAP: usize = 4;

fn column_widths(table: &StatsTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();

    for row in table.rows.iter().chain(std::iter::once(&table.footer)) {
        let cells = std::iter::once(&row.label).chain(row.values.iter());
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    widths
}

fn format_line(cells: &[&str], widths: &[usize]) -> String {
    let mut line = String::new();

    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            line.push_str(&format!("{:<width$}", cell, width = width));
        } else {
            line.push_str(&" ".repeat(COLUMN_GAP));
            line.push_str(&format!("{:>width$}", cell, width = width));
        }
    }

    line.trim_end().to_string()
}

fn row_cells(row: &TableRow) -> Vec<&str> {
    std::iter::once(row.label.as_str())
        .chain(row.values.iter().map(String::as_str))
        .collect()
}

/// Render a stats table with aligned columns.
///
/// Headers and the total row are bold when the terminal supports it.
pub fn render_table(table: &StatsTable) -> String {
    let widths = column_widths(table);
    let bold = Style::new().bold();

    let headers: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    let header_line = format_line(&headers, &widths);
    let separator = "-".repeat(header_line.chars().count());

    let mut out = String::new();
    out.push_str(&format!("{}\n", bold.apply_to(header_line)));
    out.push_str(&separator);
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format_line(&row_cells(row), &widths));
        out.push('\n');
    }

    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        bold.apply_to(format_line(&row_cells(&table.footer), &widths))
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use codetoolslib::output::HEADERS;

    fn row(label: &str, values: &[&str]) -> TableRow {
        TableRow {
            label: label.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_table_alignment() {
        console::set_colors_enabled(false);

        let table = StatsTable {
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: vec![
                row("C++", &["1200", "300", "150", "90"]),
                row("Python", &["5", "0", "1", "2"]),
            ],
            footer: row("Total", &["1205", "300", "151", "92"]),
        };

        let out = render_table(&table);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Language    Code    Test    Comment    Blank");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "C++         1200     300        150       90");
        assert_eq!(lines[3], "Python         5       0          1        2");
        assert_eq!(lines[5], "Total       1205     300        151       92");
    }
}
