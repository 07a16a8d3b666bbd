//! PDF text extraction with lopdf.

use crate::error::{MedallionError, Result};
use lopdf::Document;

/// Text of a PDF file together with its page count.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfText {
    pub content: String,
    pub page_count: usize,
}

/// Extract the text of every page, in page order, separated by newlines.
///
/// # Errors
///
/// - `MedallionError::Parsing` if the bytes are not a PDF or a page's content
///   stream cannot be decoded
/// - `MedallionError::Parsing` if the document is encrypted, even when the
///   password is empty
pub fn extract_text(bytes: &[u8]) -> Result<PdfText> {
    let doc = Document::load_mem(bytes)?;

    if doc.is_encrypted() {
        return Err(MedallionError::parsing("PDF is password-protected"));
    }

    let pages = doc.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());

    for page_number in pages.keys() {
        let text = doc
            .extract_text(&[*page_number])
            .map_err(|e| MedallionError::parsing(format!("Failed to extract text from page {}: {}", page_number, e)))?;
        page_texts.push(text);
    }

    Ok(PdfText {
        page_count: page_texts.len(),
        content: page_texts.join("\n"),
    })
}
