//! Summary document rendering

use std::path::Path;

use crate::docx::{write_docx, DocumentBuilder, DocumentSpec, TableSpec};
use crate::summary::table::{free_text, parse_table_block, TableBlock};
use crate::Result;

/// Document heading ("Meeting Summary").
pub const SUMMARY_HEADING: &str = "סיכום ישיבה";

/// Output columns: task name, responsible person, required date.
pub const TARGET_COLUMNS: [&str; 3] = ["שם המשימה", "שם האחראי", "תאריך נדרש לביצוע"];

/// RIGHT-TO-LEFT MARK, prefixed to every free-text paragraph.
pub const RLM: char = '\u{200F}';

/// Describe the output document for a model response.
pub fn compose_document(summary: &str) -> DocumentSpec {
    let mut builder = DocumentBuilder::new().heading(SUMMARY_HEADING, true);

    for line in free_text(summary)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
    {
        builder = builder.paragraph(format!("{RLM}{line}"), true);
    }

    if let Some(block) = parse_table_block(summary) {
        builder = builder.table(project_to_target(&block));
    }

    builder.build()
}

/// Render `summary` and write it to `out_path`.
pub fn render_summary(summary: &str, out_path: &Path) -> Result<DocumentSpec> {
    let spec = compose_document(summary);
    write_docx(&spec, out_path)?;
    tracing::info!("Summary document written to {}", out_path.display());
    Ok(spec)
}

/// Reorder source columns into [`TARGET_COLUMNS`]; unknown headers are
/// dropped and missing ones become empty cells.
fn project_to_target(block: &TableBlock) -> TableSpec {
    let positions: Vec<Option<usize>> = TARGET_COLUMNS
        .iter()
        .map(|target| block.headers.iter().position(|h| h == target))
        .collect();

    if positions.iter().all(Option::is_none) {
        tracing::warn!(
            "Tasks table headers {:?} match no known column",
            block.headers
        );
    }

    let rows = block
        .rows
        .iter()
        .map(|row| {
            positions
                .iter()
                .map(|pos| pos.and_then(|i| row.get(i)).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    TableSpec {
        headers: TARGET_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        rtl: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::TABLE_MARKER;

    #[test]
    fn summary_without_marker_has_no_table() {
        let spec = compose_document("Point one\n\n  Point two  \n");

        assert_eq!(spec.tables().count(), 0);
        let texts: Vec<_> = spec.paragraphs().map(|p| p.text.clone()).collect();
        assert_eq!(texts, ["\u{200F}Point one", "\u{200F}Point two"]);
    }

    #[test]
    fn heading_is_first_and_right_to_left() {
        let spec = compose_document("");
        let headings: Vec<_> = spec.headings().collect();

        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, SUMMARY_HEADING);
        assert!(headings[0].rtl);
        assert_eq!(spec.blocks().len(), 1);
    }

    #[test]
    fn every_paragraph_starts_with_rlm_and_is_rtl() {
        let spec = compose_document("- item\nשורה\n");

        for p in spec.paragraphs() {
            assert!(p.text.starts_with(RLM));
            assert!(p.rtl);
        }
    }

    #[test]
    fn columns_are_reordered_into_target_schema() {
        let summary = format!(
            "Notes\n{TABLE_MARKER}\nתאריך נדרש לביצוע | שם המשימה | הערות | שם האחראי\n2024-02-01 | Book room | urgent | Avi\n"
        );
        let spec = compose_document(&summary);
        let table = spec.tables().next().unwrap();

        assert_eq!(table.headers, TARGET_COLUMNS);
        assert_eq!(table.rows, vec![vec!["Book room", "Avi", "2024-02-01"]]);
        assert!(table.rtl);
    }

    #[test]
    fn missing_target_columns_are_empty() {
        let summary = format!("{TABLE_MARKER}\nשם האחראי | Task\nDana | Buy snacks\nAvi | Call\n");
        let spec = compose_document(&summary);
        let table = spec.tables().next().unwrap();

        assert_eq!(
            table.rows,
            vec![vec!["", "Dana", ""], vec!["", "Avi", ""]]
        );
    }

    #[test]
    fn unparseable_table_still_renders_free_text() {
        let summary = format!("Decisions made\n{TABLE_MARKER}\nלא נמצאו משימות לביצוע\n");
        let spec = compose_document(&summary);

        assert_eq!(spec.tables().count(), 0);
        assert_eq!(spec.paragraphs().count(), 1);
    }

    #[test]
    fn render_summary_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out_SUMMARY.docx");

        let spec = render_summary("Line", &path).unwrap();
        assert!(path.exists());
        assert_eq!(spec.paragraphs().count(), 1);
    }

    #[test]
    fn every_written_paragraph_including_cells_is_right_to_left() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtl_SUMMARY.docx");
        let summary = format!(
            "Intro\n{TABLE_MARKER}\nשם המשימה | שם האחראי | תאריך נדרש לביצוע\nA | Dana | 2024-01-01\nB | Avi | 2024-02-01\n"
        );

        render_summary(&summary, &path).unwrap();
        let xml = crate::docx::read_document_xml(&path).unwrap();
        let rtl_paragraph = r#"<w:bidi/><w:jc w:val="right"/>"#;

        assert!(xml.contains(&format!(r#"<w:pStyle w:val="Title"/>{rtl_paragraph}"#)));
        assert_eq!(xml.matches("<w:p>").count(), xml.matches(rtl_paragraph).count());

        let table = &xml[xml.find("<w:tbl>").unwrap()..xml.find("</w:tbl>").unwrap()];
        let cells = table.matches("<w:tc>").count();
        assert_eq!(cells, 9);
        assert_eq!(table.matches(rtl_paragraph).count(), cells);
        assert_eq!(table.matches("<w:rtl/>").count(), cells);
    }
}
