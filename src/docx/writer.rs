//! Document description and OOXML writer

use quick_xml::escape::escape;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::Result;

/// A4 page with one-inch margins, in twentieths of a point.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const PAGE_MARGIN: u32 = 1440;

/// A single paragraph of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphSpec {
    pub text: String,
    pub rtl: bool,
}

/// A grid table with one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub rtl: bool,
}

/// Top-level body element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(ParagraphSpec),
    Paragraph(ParagraphSpec),
    Table(TableSpec),
}

/// Immutable description of an output document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSpec {
    blocks: Vec<Block>,
}

impl DocumentSpec {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn headings(&self) -> impl Iterator<Item = &ParagraphSpec> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Heading(p) => Some(p),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphSpec> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

/// Accumulates blocks and produces a [`DocumentSpec`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, text: impl Into<String>, rtl: bool) -> Self {
        self.blocks.push(Block::Heading(ParagraphSpec {
            text: text.into(),
            rtl,
        }));
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>, rtl: bool) -> Self {
        self.blocks.push(Block::Paragraph(ParagraphSpec {
            text: text.into(),
            rtl,
        }));
        self
    }

    pub fn table(mut self, table: TableSpec) -> Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn build(self) -> DocumentSpec {
        DocumentSpec {
            blocks: self.blocks,
        }
    }
}

/// Write the document to `path`, replacing any existing file.
pub fn write_docx(spec: &DocumentSpec, path: &Path) -> Result<()> {
    let document_xml = document_xml(spec);

    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);

    let parts: [(&str, &str); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("word/styles.xml", STYLES_XML),
        ("word/document.xml", &document_xml),
    ];

    for (name, body) in parts {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(body.as_bytes())?;
    }
    zip.finish()?;

    tracing::debug!(
        "Wrote {} blocks to {}",
        spec.blocks().len(),
        path.display()
    );
    Ok(())
}

fn document_xml(spec: &DocumentSpec) -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>"#);

    for block in spec.blocks() {
        match block {
            Block::Heading(p) => push_paragraph(&mut xml, Some("Title"), &p.text, p.rtl),
            Block::Paragraph(p) => push_paragraph(&mut xml, None, &p.text, p.rtl),
            Block::Table(t) => push_table(&mut xml, t),
        }
    }

    xml.push_str(&format!(
        r#"<w:sectPr><w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/><w:pgMar w:top="{PAGE_MARGIN}" w:right="{PAGE_MARGIN}" w:bottom="{PAGE_MARGIN}" w:left="{PAGE_MARGIN}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#
    ));
    xml.push_str("</w:body></w:document>");
    xml
}

fn push_paragraph(xml: &mut String, style: Option<&str>, text: &str, rtl: bool) {
    xml.push_str("<w:p>");
    if style.is_some() || rtl {
        xml.push_str("<w:pPr>");
        if let Some(style) = style {
            xml.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
        }
        if rtl {
            xml.push_str(r#"<w:bidi/><w:jc w:val="right"/>"#);
        }
        xml.push_str("</w:pPr>");
    }
    if !text.is_empty() {
        xml.push_str("<w:r>");
        if rtl {
            xml.push_str("<w:rPr><w:rtl/></w:rPr>");
        }
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(&escape(text));
        xml.push_str("</w:t></w:r>");
    }
    xml.push_str("</w:p>");
}

fn push_table(xml: &mut String, table: &TableSpec) {
    let columns = table.headers.len().max(1) as u32;
    let column_width = (PAGE_WIDTH - 2 * PAGE_MARGIN) / columns;

    xml.push_str(r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/>"#);
    if table.rtl {
        xml.push_str("<w:bidiVisual/>");
    }
    xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/>"#);
    if table.rtl {
        xml.push_str(r#"<w:jc w:val="right"/>"#);
    }
    xml.push_str(r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/></w:tblPr>"#);

    xml.push_str("<w:tblGrid>");
    for _ in 0..columns {
        xml.push_str(&format!(r#"<w:gridCol w:w="{column_width}"/>"#));
    }
    xml.push_str("</w:tblGrid>");

    push_row(xml, &table.headers, column_width, table.rtl);
    for row in &table.rows {
        push_row(xml, row, column_width, table.rtl);
    }
    xml.push_str("</w:tbl>");
}

fn push_row(xml: &mut String, cells: &[String], width: u32, rtl: bool) {
    xml.push_str("<w:tr>");
    for cell in cells {
        xml.push_str(&format!(
            r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/></w:tcPr>"#
        ));
        push_paragraph(xml, None, cell, rtl);
        xml.push_str("</w:tc>");
    }
    xml.push_str("</w:tr>");
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:bCs/><w:sz w:val="52"/><w:szCs w:val="52"/></w:rPr></w:style><w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style></w:styles>"#;
