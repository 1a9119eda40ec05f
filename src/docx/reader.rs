//! Body walker for `word/document.xml`

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use crate::{Result, SikumError};

/// Text content of a document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxContent {
    /// Top-level paragraphs in order, including empty ones.
    pub paragraphs: Vec<String>,
    /// Top-level tables as rows of cell text. Cell paragraphs are joined with `\n`.
    pub tables: Vec<Vec<Vec<String>>>,
}

/// Read the raw `word/document.xml` part of a package.
pub fn read_document_xml(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut part = archive
        .by_name("word/document.xml")
        .map_err(|e| SikumError::Docx(format!("word/document.xml not readable: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Read paragraphs and tables from a `.docx` file.
pub fn read_docx(path: &Path) -> Result<DocxContent> {
    let xml = read_document_xml(path)?;
    parse_body(&xml)
}

/// Containers whose text is not part of the enclosing paragraph: text boxes,
/// drawings, alternate-content branches and content controls.
const SKIPPED_SUBTREES: &[&[u8]] = &[
    b"mc:AlternateContent",
    b"w:txbxContent",
    b"w:drawing",
    b"w:pict",
    b"w:object",
    b"w:sdt",
];

fn is_skipped_subtree(name: &[u8]) -> bool {
    SKIPPED_SUBTREES.contains(&name)
}

#[derive(Default)]
struct BodyWalker {
    content: DocxContent,
    skip_depth: usize,
    table_depth: usize,
    paragraph_depth: usize,
    in_text: bool,
    paragraph: Option<String>,
    row: Option<Vec<String>>,
    cell: Option<String>,
    cell_paragraphs: usize,
}

impl BodyWalker {
    fn start(&mut self, name: &[u8]) {
        if is_skipped_subtree(name) {
            self.skip_depth += 1;
            return;
        }
        if self.skip_depth > 0 {
            return;
        }
        match name {
            b"w:tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.content.tables.push(Vec::new());
                }
            }
            b"w:tr" if self.table_depth == 1 => self.row = Some(Vec::new()),
            b"w:tc" if self.table_depth == 1 => {
                self.cell = Some(String::new());
                self.cell_paragraphs = 0;
            }
            b"w:p" => {
                if self.table_depth == 0 && self.paragraph_depth == 0 {
                    self.paragraph = Some(String::new());
                }
                if self.table_depth == 1 && self.paragraph_depth == 0 {
                    self.begin_cell_paragraph();
                }
                self.paragraph_depth += 1;
            }
            b"w:t" => self.in_text = true,
            _ => {}
        }
    }

    fn empty(&mut self, name: &[u8]) {
        if self.skip_depth > 0 {
            return;
        }
        match name {
            b"w:p" => {
                if self.table_depth == 0 && self.paragraph_depth == 0 {
                    self.content.paragraphs.push(String::new());
                }
                if self.table_depth == 1 && self.paragraph_depth == 0 {
                    self.begin_cell_paragraph();
                }
            }
            b"w:tab" => self.push_text("\t"),
            b"w:br" | b"w:cr" => self.push_text("\n"),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if is_skipped_subtree(name) {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }
        match name {
            b"w:tbl" => self.table_depth = self.table_depth.saturating_sub(1),
            b"w:tr" if self.table_depth == 1 => {
                if let (Some(row), Some(table)) = (self.row.take(), self.content.tables.last_mut())
                {
                    table.push(row);
                }
            }
            b"w:tc" if self.table_depth == 1 => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.push(cell);
                }
            }
            b"w:p" => {
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
                if self.table_depth == 0 && self.paragraph_depth == 0 {
                    if let Some(paragraph) = self.paragraph.take() {
                        self.content.paragraphs.push(paragraph);
                    }
                }
            }
            b"w:t" => self.in_text = false,
            _ => {}
        }
    }

    fn begin_cell_paragraph(&mut self) {
        if let Some(cell) = self.cell.as_mut() {
            if self.cell_paragraphs > 0 {
                cell.push('\n');
            }
            self.cell_paragraphs += 1;
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.table_depth == 0 {
            if let Some(paragraph) = self.paragraph.as_mut() {
                paragraph.push_str(text);
            }
        } else if self.table_depth == 1 {
            if let Some(cell) = self.cell.as_mut() {
                cell.push_str(text);
            }
        }
    }
}

fn parse_body(xml: &str) -> Result<DocxContent> {
    let mut reader = Reader::from_str(xml);
    // w:t may carry significant leading/trailing spaces
    reader.trim_text(false);

    let mut walker = BodyWalker::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => walker.start(e.name().as_ref()),
            Ok(Event::Empty(e)) => walker.empty(e.name().as_ref()),
            Ok(Event::Text(e)) if walker.in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| SikumError::Xml(format!("Bad text in document.xml: {e}")))?;
                walker.push_text(&text);
            }
            Ok(Event::End(e)) => walker.end(e.name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SikumError::Xml(format!(
                    "Error parsing document.xml: {e:?}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(walker.content)
}
