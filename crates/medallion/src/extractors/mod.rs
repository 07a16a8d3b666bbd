//! Built-in document extractors.
//!
//! All extractors implement the `DocumentExtractor` plugin trait.

use crate::plugins::registry::{DocumentExtractorRegistry, get_document_extractor_registry};
use crate::{MedallionError, Result};
use once_cell::sync::Lazy;
#[cfg(any(feature = "office", feature = "pdf"))]
use std::sync::Arc;

#[cfg(feature = "office")]
pub mod docx;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "office")]
pub use docx::DocxExtractor;

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

/// Registers the built-in extractors with the global registry exactly once.
static EXTRACTORS_INITIALIZED: Lazy<Result<()>> = Lazy::new(register_default_extractors);

/// Ensure built-in extractors are registered in the global registry.
///
/// Safe to call multiple times. If the registry was emptied after the first
/// registration the defaults are registered again.
pub fn ensure_initialized() -> Result<()> {
    EXTRACTORS_INITIALIZED
        .as_ref()
        .map(|_| ())
        .map_err(|e| MedallionError::Plugin {
            message: format!("Failed to register default extractors: {}", e),
            plugin_name: "built-in-extractors".to_string(),
        })?;

    let registry = get_document_extractor_registry();
    let registry_guard = registry
        .read()
        .map_err(|e| MedallionError::LockPoisoned(format!("Document extractor registry: {}", e)))?;

    if registry_guard.list().is_empty() {
        drop(registry_guard);
        register_default_extractors()?;
    }

    Ok(())
}

/// Register all built-in extractors with the global registry.
///
/// # Example
///
/// ```rust
/// use medallion::extractors::register_default_extractors;
///
/// # fn main() -> medallion::Result<()> {
/// register_default_extractors()?;
/// # Ok(())
/// # }
/// ```
pub fn register_default_extractors() -> Result<()> {
    let registry = get_document_extractor_registry();
    let mut registry = registry
        .write()
        .map_err(|e| MedallionError::LockPoisoned(format!("Document extractor registry: {}", e)))?;

    register_into(&mut registry)
}

/// Register the built-in extractors into a caller-owned registry.
#[cfg_attr(not(any(feature = "office", feature = "pdf")), allow(unused_variables))]
pub fn register_into(registry: &mut DocumentExtractorRegistry) -> Result<()> {
    #[cfg(feature = "office")]
    registry.register(Arc::new(DocxExtractor::new()))?;

    #[cfg(feature = "pdf")]
    registry.register(Arc::new(PdfExtractor::new()))?;

    Ok(())
}

/// A fresh registry holding only the built-in extractors.
pub fn default_registry() -> Result<DocumentExtractorRegistry> {
    let mut registry = DocumentExtractorRegistry::new();
    register_into(&mut registry)?;
    Ok(registry)
}
