//! Document extractor plugin trait.

use crate::Result;
use crate::plugins::Plugin;
use crate::types::ExtractionResult;
use async_trait::async_trait;

/// Converts the raw bytes of one document format into plain text.
///
/// Extractors are selected by file extension through
/// [`DocumentExtractorRegistry`](crate::plugins::registry::DocumentExtractorRegistry).
/// When several extractors claim the same extension the one with the highest
/// [`priority`](DocumentExtractor::priority) wins.
///
/// Extractors never see the blob name; the batch orchestrator decorates
/// failures with it.
///
/// # Example
///
/// ```rust
/// use medallion::plugins::{DocumentExtractor, Plugin};
/// use medallion::types::{ExtractionResult, Metadata};
/// use medallion::Result;
/// use async_trait::async_trait;
///
/// struct PlainTextExtractor;
///
/// impl Plugin for PlainTextExtractor {
///     fn name(&self) -> &str { "plain-text-extractor" }
///     fn version(&self) -> String { "1.0.0".to_string() }
///     fn initialize(&self) -> Result<()> { Ok(()) }
///     fn shutdown(&self) -> Result<()> { Ok(()) }
/// }
///
/// #[async_trait]
/// impl DocumentExtractor for PlainTextExtractor {
///     async fn extract_bytes(&self, content: &[u8]) -> Result<ExtractionResult> {
///         Ok(ExtractionResult {
///             content: String::from_utf8_lossy(content).into_owned(),
///             mime_type: "text/plain".to_string(),
///             metadata: Metadata::default(),
///         })
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["md"]
///     }
///
///     fn format_label(&self) -> &str {
///         "Markdown"
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentExtractor: Plugin {
    /// Extract text from an in-memory document.
    ///
    /// # Errors
    ///
    /// - `MedallionError::Parsing` - the bytes are not a valid document of this format
    /// - `MedallionError::Io` - I/O errors (these always bubble up)
    async fn extract_bytes(&self, content: &[u8]) -> Result<ExtractionResult>;

    /// Extensions (without the leading dot) handled by this extractor.
    fn supported_extensions(&self) -> &[&str];

    /// Short human-readable format name used in error messages (e.g. `"PDF"`).
    fn format_label(&self) -> &str;

    /// Selection priority; 50 for built-in extractors.
    fn priority(&self) -> i32 {
        50
    }
}
