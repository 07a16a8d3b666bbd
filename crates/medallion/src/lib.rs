//! Medallion - bronze to silver text extraction
//!
//! Medallion takes references to documents stored in the `bronze` container,
//! extracts their plain text, and writes one `.txt` blob per document into the
//! `silver` container. Each batch reports which documents were processed and
//! why the others failed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medallion::{BatchProcessor, DocumentReference, FsBlobStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> medallion::Result<()> {
//! let processor = BatchProcessor::new(Arc::new(FsBlobStore::new("./data")))?;
//! let outcome = processor
//!     .process_batch(&[
//!         DocumentReference::new("bronze", "contracts/lease.docx"),
//!         DocumentReference::new("bronze", "scan.pdf"),
//!     ])
//!     .await?;
//!
//! for name in outcome.processed_files() {
//!     println!("processed {}", name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): batch orchestration, config loading, naming rules
//! - **Plugin System** (`plugins`): extractor trait and extension-keyed registry
//! - **Extractors** (`extractors`, `extraction`): DOCX and PDF text extraction
//! - **Storage** (`storage`): blob store trait with filesystem and in-memory backends
//! - **API** (`api`, feature `api`): HTTP trigger for batches

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod plugins;
pub mod storage;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use error::{MedallionError, Result};
pub use types::*;

pub use core::batch::BatchProcessor;
pub use core::config::{EmptyTextPolicy, MedallionConfig};
pub use core::naming::{DESTINATION_CONTAINER, DESTINATION_SUFFIX, SOURCE_CONTAINER, destination_name};
pub use core::observer::{BatchObserver, NoopObserver, TracingObserver};

pub use plugins::registry::{DocumentExtractorRegistry, get_document_extractor_registry};
pub use plugins::{DocumentExtractor, Plugin};

pub use storage::{BlobStore, FsBlobStore, MemoryBlobStore};
