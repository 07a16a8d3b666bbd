//! Format-specific text extraction.
//!
//! These functions are synchronous and CPU-bound; the extractor plugins in
//! [`crate::extractors`] run them on the blocking pool.

#[cfg(feature = "office")]
pub mod docx;

#[cfg(feature = "pdf")]
pub mod pdf;
