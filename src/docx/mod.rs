//! Minimal Word (.docx) support
//!
//! A `.docx` file is a ZIP package around `word/document.xml`. Reading only
//! walks the body; writing materializes a [`DocumentSpec`] in a single pass.

mod reader;
mod writer;

pub use reader::{read_docx, read_document_xml, DocxContent};
pub use writer::{write_docx, Block, DocumentBuilder, DocumentSpec, ParagraphSpec, TableSpec};
