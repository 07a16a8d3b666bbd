//! Batch orchestration, configuration and naming rules.
//!
//! - **Batch**: [`BatchProcessor`](batch::BatchProcessor) runs one extraction batch
//! - **Observer**: progress events emitted while a batch runs
//! - **Configuration**: loading `medallion.toml` and friends
//! - **Naming**: container constants and destination-name derivation
//!
//! # Example
//!
//! ```rust,no_run
//! use medallion::core::batch::BatchProcessor;
//! use medallion::core::config::MedallionConfig;
//! use medallion::types::DocumentReference;
//!
//! # async fn example() -> medallion::Result<()> {
//! let config = MedallionConfig::discover()?.unwrap_or_default();
//! let processor = BatchProcessor::from_config(&config)?;
//! let outcome = processor
//!     .process_batch(&[DocumentReference::new("bronze", "report.docx")])
//!     .await?;
//! println!("{}", serde_json::to_string(&outcome)?);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod naming;
pub mod observer;

pub use batch::BatchProcessor;
pub use config::{EmptyTextPolicy, MedallionConfig};
pub use observer::{BatchObserver, NoopObserver, TracingObserver};
