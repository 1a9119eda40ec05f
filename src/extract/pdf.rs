//! PDF text-layer extraction

use lopdf::Document;
use std::path::Path;

use crate::{Result, SikumError};

/// Extract the text layer of every page, in page order.
///
/// Pages without extractable text are skipped rather than kept as blanks.
pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
    let doc = Document::load(path).map_err(|e| SikumError::Pdf(e.to_string()))?;

    let mut pages = Vec::new();
    for (page_num, _page_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(text) if !text.trim().is_empty() => pages.push(text.trim_end().to_string()),
            Ok(_) => tracing::debug!("Page {} has no text layer, skipping", page_num),
            Err(e) => tracing::debug!("Page {} text extraction failed, skipping: {}", page_num, e),
        }
    }

    Ok(pages)
}
