//! Plain-text rendering of report tables for the terminal.

use rollcall_recon::{Report, ResultTable};
use unicode_width::UnicodeWidthStr;

/// Render every table of the report, banner first, tables separated by a blank line.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&report.meta.title);
    out.push('\n');
    out.push_str(&"=".repeat(report.meta.title.width()));
    out.push('\n');

    for table in &report.tables {
        out.push('\n');
        out.push_str(&render_table(table));
    }
    out
}

/// Columns padded to their widest cell. Cells that look numeric (counts,
/// percentages) are right-aligned.
pub fn render_table(table: &ResultTable) -> String {
    let widths: Vec<usize> = (0..table.headers.len())
        .map(|c| {
            table
                .rows
                .iter()
                .filter_map(|r| r.get(c))
                .map(|v| v.width())
                .chain(std::iter::once(table.headers[c].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');
    push_row(&mut out, &table.headers, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    for row in &table.rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.width());
        if looks_numeric(cell) {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn looks_numeric(cell: &str) -> bool {
    let body = cell.strip_suffix('%').unwrap_or(cell);
    !body.is_empty() && body.chars().all(|c| c.is_ascii_digit() || c == '.')
}
