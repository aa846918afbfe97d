use std::collections::HashSet;

use crate::config::ExtractOptions;
use crate::sheet::SheetReader;

/// Collects the free-text lines (title, period, company) above the header row.
///
/// Each row becomes one line made of its distinct non-blank cell texts, with
/// internal whitespace collapsed. Merged cells that repeat a value inside a
/// row contribute it once. Blank lines are dropped and repeated lines keep
/// only their first occurrence.
pub fn capture_header_lines<S>(sheet: &S, header_row: u32, options: &ExtractOptions) -> Vec<String>
where
    S: SheetReader + ?Sized,
{
    let last_col = options.header_line_scan_cols.min(sheet.column_count());
    let mut lines: Vec<String> = Vec::new();
    let mut seen_lines: HashSet<String> = HashSet::new();

    for row in 1..header_row.min(sheet.row_count() + 1) {
        let mut parts: Vec<String> = Vec::new();
        for col in 1..=last_col {
            let text = collapse_whitespace(&sheet.cell_text(row, col));
            if text.is_empty() || parts.contains(&text) {
                continue;
            }
            parts.push(text);
        }

        let line = parts.join(" ");
        if line.is_empty() || !seen_lines.insert(line.clone()) {
            continue;
        }
        lines.push(line);
    }

    lines
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
