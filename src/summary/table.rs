//! Tasks-table section parser
//!
//! Model output marks its tasks table with a heading line containing
//! [`TABLE_MARKER`]; the pipe-delimited lines after it are the table.

/// Substring that starts the tasks-table section ("tasks table").
pub const TABLE_MARKER: &str = "טבלת משימות";

/// A pipe-delimited table recovered from model output.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Text preceding the first marker occurrence, or the whole summary.
pub fn free_text(summary: &str) -> &str {
    match summary.find(TABLE_MARKER) {
        Some(idx) => &summary[..idx],
        None => summary,
    }
}

/// Parse the tasks table that follows the marker line, if there is one.
///
/// Malformed sections are not errors; they just produce `None`.
pub fn parse_table_block(summary: &str) -> Option<TableBlock> {
    let mut lines = summary.lines();
    lines.find(|line| line.contains(TABLE_MARKER))?;

    let candidates: Vec<&str> = lines
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !is_divider(line))
        .collect();

    let (header_line, row_lines) = candidates.split_first()?;
    if row_lines.is_empty() {
        return None;
    }

    let headers = split_fields(header_line);
    let rows: Vec<Vec<String>> = row_lines
        .iter()
        .map(|line| split_fields(line))
        .filter(|row| !row.is_empty() && row.len() == headers.len())
        .collect();

    if headers.is_empty() || rows.is_empty() {
        return None;
    }

    tracing::debug!(
        "Parsed tasks table: {} columns, {} rows",
        headers.len(),
        rows.len()
    );
    Some(TableBlock { headers, rows })
}

/// Separator rows such as `|---|---|` or `-----`.
fn is_divider(line: &str) -> bool {
    line.trim().chars().all(|c| c == '-' || c == '|')
}

fn split_fields(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}
