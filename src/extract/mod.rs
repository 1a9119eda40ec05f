//! Transcript text extraction
//!
//! Turns an uploaded `.txt`, `.docx` or `.pdf` file into one plain-text string.

mod pdf;

use std::path::Path;

use crate::{Result, SikumError};

/// Input formats recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    PlainText,
    Docx,
    Pdf,
}

impl SourceFormat {
    /// Detect the format from the file name, ignoring extension case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(Self::PlainText),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(SikumError::UnsupportedFormat(if ext.is_empty() {
                path.display().to_string()
            } else {
                format!(".{ext}")
            })),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

/// Extract the transcript text from `path`.
///
/// Unsupported extensions fail with [`SikumError::UnsupportedFormat`]; a
/// supported file without any text fails with [`SikumError::EmptyExtraction`].
pub fn extract_text(path: &Path) -> Result<String> {
    let format = SourceFormat::from_path(path)?;
    tracing::debug!("Extracting {} text from {}", format.as_str(), path.display());

    let text = match format {
        SourceFormat::PlainText => std::fs::read_to_string(path)?,
        SourceFormat::Docx => crate::docx::read_docx(path)?.paragraphs.join("\n"),
        SourceFormat::Pdf => pdf::extract_pages(path)?.join("\n"),
    };

    if text.trim().is_empty() {
        return Err(SikumError::EmptyExtraction);
    }

    tracing::debug!("Extracted {} characters", text.chars().count());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{write_docx, DocumentBuilder, TableSpec};
    use std::path::PathBuf;

    #[test]
    fn format_detection_ignores_case() {
        for name in ["notes.txt", "NOTES.TXT", "Notes.Txt"] {
            assert_eq!(
                SourceFormat::from_path(Path::new(name)).unwrap(),
                SourceFormat::PlainText
            );
        }
        assert_eq!(
            SourceFormat::from_path(Path::new("a.DocX")).unwrap(),
            SourceFormat::Docx
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.PDF")).unwrap(),
            SourceFormat::Pdf
        );
    }

    #[test]
    fn unsupported_extensions_are_rejected() {
        for name in ["a.doc", "a.RTF", "a.md", "README", "archive.txt.zip"] {
            let err = extract_text(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, SikumError::UnsupportedFormat(_)),
                "{name} should be unsupported, got {err:?}"
            );
        }
    }

    #[test]
    fn plain_text_is_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meeting.txt");
        let body = "שלום לכולם\n\nBudget review.\n";
        std::fs::write(&path, body).unwrap();

        assert_eq!(extract_text(&path).unwrap(), body);
        assert_eq!(extract_text(&path).unwrap(), extract_text(&path).unwrap());
    }

    #[test]
    fn empty_text_file_is_empty_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.TXT");
        std::fs::write(&path, "  \n").unwrap();

        assert!(matches!(
            extract_text(&path),
            Err(SikumError::EmptyExtraction)
        ));
    }

    #[test]
    fn invalid_utf8_text_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        assert!(matches!(extract_text(&path), Err(SikumError::Io(_))));
    }

    #[test]
    fn docx_extraction_joins_paragraphs_and_skips_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("meeting.docx");
        let spec = DocumentBuilder::new()
            .paragraph("Dana: hello", false)
            .table(TableSpec {
                headers: vec!["ignored".into()],
                rows: vec![vec!["also ignored".into()]],
                rtl: false,
            })
            .paragraph("Avi: hi", false)
            .build();
        write_docx(&spec, &path).unwrap();

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "Dana: hello\nAvi: hi");
        assert_eq!(text, extract_text(&path).unwrap());
    }
}
