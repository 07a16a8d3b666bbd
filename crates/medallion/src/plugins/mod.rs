//! Plugin system for document extractors.
//!
//! # Plugin Types
//!
//! - [`Plugin`] - Base trait that all plugins must implement
//! - [`DocumentExtractor`] - Format-specific text extraction
//!
//! # Lifecycle Pattern
//!
//! Plugins are stored in `Arc<dyn Trait>` for thread-safe shared access:
//!
//! ```rust
//! use medallion::plugins::{DocumentExtractor, Plugin};
//! use medallion::plugins::registry::DocumentExtractorRegistry;
//! use std::sync::Arc;
//!
//! # struct MyExtractor;
//! # use medallion::types::{ExtractionResult, Metadata};
//! # impl medallion::plugins::Plugin for MyExtractor {
//! #     fn name(&self) -> &str { "my-extractor" }
//! #     fn version(&self) -> String { "1.0.0".to_string() }
//! #     fn initialize(&self) -> medallion::Result<()> { Ok(()) }
//! #     fn shutdown(&self) -> medallion::Result<()> { Ok(()) }
//! # }
//! # #[async_trait::async_trait]
//! # impl DocumentExtractor for MyExtractor {
//! #     async fn extract_bytes(&self, _: &[u8]) -> medallion::Result<ExtractionResult> {
//! #         Ok(ExtractionResult {
//! #             content: String::new(),
//! #             mime_type: "text/plain".to_string(),
//! #             metadata: Metadata::default(),
//! #         })
//! #     }
//! #     fn supported_extensions(&self) -> &[&str] { &["rtf"] }
//! #     fn format_label(&self) -> &str { "RTF" }
//! # }
//! let mut registry = DocumentExtractorRegistry::new();
//! registry.register(Arc::new(MyExtractor))?;
//! assert!(registry.supports("letter.rtf"));
//! # Ok::<(), medallion::MedallionError>(())
//! ```

mod extractor;
pub mod registry;
mod traits;

pub use extractor::DocumentExtractor;
pub use registry::{DocumentExtractorRegistry, get_document_extractor_registry};
pub use traits::Plugin;
