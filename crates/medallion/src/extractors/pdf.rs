//! PDF document extractor.

use crate::Result;
use crate::core::naming::PDF_MIME_TYPE;
use crate::extraction::pdf;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, Metadata};
use async_trait::async_trait;

/// PDF extractor reading each page's content stream with lopdf.
///
/// Scanned PDFs without a text layer produce empty pages; there is no OCR
/// fallback.
pub struct PdfExtractor;

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_bytes(&self, content: &[u8]) -> Result<ExtractionResult> {
        let bytes = content.to_vec();
        let text = tokio::task::spawn_blocking(move || pdf::extract_text(&bytes))
            .await
            .map_err(|e| crate::MedallionError::parsing(format!("PDF extraction task failed: {}", e)))??;

        tracing::trace!(pages = text.page_count, chars = text.content.len(), "Extracted PDF text");

        Ok(ExtractionResult {
            content: text.content,
            mime_type: PDF_MIME_TYPE.to_string(),
            metadata: Metadata {
                page_count: Some(text.page_count),
                ..Default::default()
            },
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn format_label(&self) -> &str {
        "PDF"
    }
}
