//! DOCX extractor.
//!
//! Supports: Microsoft Word (.docx)

use crate::Result;
use crate::core::naming::DOCX_MIME_TYPE;
use crate::extraction::docx;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::{ExtractionResult, Metadata};
use async_trait::async_trait;

/// Word document extractor producing one line per body paragraph.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
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

    fn description(&self) -> &str {
        "Top-level paragraph text extraction from WordprocessingML packages"
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    async fn extract_bytes(&self, content: &[u8]) -> Result<ExtractionResult> {
        let bytes = content.to_vec();
        let text = tokio::task::spawn_blocking(move || docx::extract_text(&bytes))
            .await
            .map_err(|e| crate::MedallionError::parsing(format!("DOCX extraction task failed: {}", e)))??;

        Ok(ExtractionResult {
            content: text.content,
            mime_type: DOCX_MIME_TYPE.to_string(),
            metadata: Metadata {
                paragraph_count: Some(text.paragraph_count),
                ..Default::default()
            },
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn format_label(&self) -> &str {
        "DOCX"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_plugin_interface() {
        let extractor = DocxExtractor::new();
        assert_eq!(extractor.name(), "docx-extractor");
        assert_eq!(extractor.version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(extractor.supported_extensions(), &["docx"]);
        assert_eq!(extractor.format_label(), "DOCX");
        assert_eq!(extractor.priority(), 50);
    }

    #[tokio::test]
    async fn test_docx_extractor_invalid_bytes() {
        let extractor = DocxExtractor::new();
        let err = extractor.extract_bytes(b"plain text, not a package").await.unwrap_err();
        assert!(matches!(err, crate::MedallionError::Parsing { .. }));
    }
}
