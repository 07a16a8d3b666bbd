//! Batch text extraction from the source container to the destination container.
//!
//! [`BatchProcessor::process_batch`] visits every reference exactly once, in
//! input order. A reference is either skipped (wrong container), recorded as
//! processed, or recorded as an error; nothing that goes wrong with one
//! reference stops the others.

use crate::core::config::{EmptyTextPolicy, MedallionConfig};
use crate::core::naming::{DESTINATION_CONTAINER, SOURCE_CONTAINER, destination_name};
use crate::core::observer::{BatchObserver, default_observer};
use crate::plugins::DocumentExtractor;
use crate::plugins::registry::{DocumentExtractorRegistry, get_document_extractor_registry};
use crate::storage::{BlobStore, FsBlobStore};
use crate::types::{BatchOutcome, DocumentReference, ItemOutcome};
use crate::{MedallionError, Result};
use std::sync::{Arc, RwLock};
use tokio::task::JoinError;

/// Runs extraction batches against one blob store.
///
/// Cloning is cheap; all collaborators are shared.
///
/// # Example
///
/// ```rust
/// use medallion::core::batch::BatchProcessor;
/// use medallion::storage::MemoryBlobStore;
/// use medallion::types::DocumentReference;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> medallion::Result<()> {
/// let processor = BatchProcessor::new(Arc::new(MemoryBlobStore::new()))?;
/// let outcome = processor
///     .process_batch(&[DocumentReference::new("raw", "ignored.pdf")])
///     .await?;
///
/// assert!(outcome.processed_files().is_empty());
/// assert_eq!(outcome.status().as_str(), "started");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BatchProcessor {
    store: Arc<dyn BlobStore>,
    registry: Arc<RwLock<DocumentExtractorRegistry>>,
    observer: Arc<dyn BatchObserver>,
    empty_text: EmptyTextPolicy,
}

impl BatchProcessor {
    /// Processor over `store` using the global registry with the built-in extractors.
    pub fn new(store: Arc<dyn BlobStore>) -> Result<Self> {
        crate::extractors::ensure_initialized()?;

        Ok(Self {
            store,
            registry: get_document_extractor_registry(),
            observer: default_observer(),
            empty_text: EmptyTextPolicy::default(),
        })
    }

    /// Processor over an [`FsBlobStore`] rooted at `config.storage.root`.
    pub fn from_config(config: &MedallionConfig) -> Result<Self> {
        let store = Arc::new(FsBlobStore::new(config.storage.root.clone()));
        Ok(Self::new(store)?.with_empty_text_policy(config.empty_text))
    }

    /// Use a dedicated registry instead of the global one.
    pub fn with_registry(mut self, registry: Arc<RwLock<DocumentExtractorRegistry>>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn BatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_empty_text_policy(mut self, policy: EmptyTextPolicy) -> Self {
        self.empty_text = policy;
        self
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<RwLock<DocumentExtractorRegistry>> {
        &self.registry
    }

    /// Extract text for every eligible reference and report what happened.
    ///
    /// # Errors
    ///
    /// `MedallionError::EmptyBatch` when `references` is empty. Failures of
    /// individual references never surface here; they are entries of
    /// [`BatchOutcome::errors`].
    pub async fn process_batch(&self, references: &[DocumentReference]) -> Result<BatchOutcome> {
        if references.is_empty() {
            return Err(MedallionError::EmptyBatch);
        }

        self.observer.batch_started(references.len());
        let mut outcome = BatchOutcome::new();

        for reference in references {
            let processor = self.clone();
            let owned = reference.clone();

            let item = match tokio::spawn(async move { processor.process_reference(&owned).await }).await {
                Ok(item) => item,
                Err(join_err) => ItemOutcome::Failed(format!(
                    "Error processing {}: {}",
                    reference.name,
                    describe_join_error(join_err)
                )),
            };

            match &item {
                ItemOutcome::Skipped => self.observer.skipped(reference),
                ItemOutcome::Processed { destination } => self.observer.processed(reference, destination),
                ItemOutcome::Failed(message) => self.observer.failed(reference, message),
            }

            outcome.record(&reference.name, item);
        }

        let outcome = outcome.finalize();
        self.observer.batch_finished(&outcome);
        Ok(outcome)
    }

    async fn process_reference(&self, reference: &DocumentReference) -> ItemOutcome {
        if reference.container != SOURCE_CONTAINER {
            return ItemOutcome::Skipped;
        }

        let name = reference.name.as_str();

        let extractor = match self.extractor_for(name) {
            Ok(extractor) => extractor,
            Err(MedallionError::UnsupportedFormat(_)) => {
                return ItemOutcome::Failed(format!("Unsupported file type: {}", name));
            }
            Err(e) => return ItemOutcome::Failed(format!("Error processing {}: {}", name, e)),
        };
        let format = extractor.format_label().to_string();

        self.observer.processing(reference, &format);

        let content = match self.store.get_blob_content(SOURCE_CONTAINER, name).await {
            Ok(content) => content,
            Err(e) => return ItemOutcome::Failed(format!("Error processing {}: {}", name, e)),
        };

        let text = match extractor.extract_bytes(&content).await {
            Ok(result) if result.content.is_empty() && self.empty_text == EmptyTextPolicy::Reject => {
                return ItemOutcome::Failed(format!(
                    "Failed to extract text from {}: {}: document contains no text",
                    format, name
                ));
            }
            Ok(result) => result.content,
            Err(e) => {
                return ItemOutcome::Failed(format!("Failed to extract text from {}: {}: {}", format, name, e));
            }
        };

        let destination = destination_name(name);
        if let Err(e) = self
            .store
            .write_to_blob(DESTINATION_CONTAINER, &destination, text.as_bytes())
            .await
        {
            return ItemOutcome::Failed(format!("Error processing {}: {}", name, e));
        }

        ItemOutcome::Processed { destination }
    }

    /// Registry lookup; the lock guard never outlives this call.
    fn extractor_for(&self, name: &str) -> Result<Arc<dyn DocumentExtractor>> {
        let registry = self
            .registry
            .read()
            .map_err(|e| MedallionError::LockPoisoned(format!("Document extractor registry: {}", e)))?;
        registry.get_for_name(name)
    }
}

fn describe_join_error(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("task panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("task panicked: {}", message)
    } else {
        "task panicked".to_string()
    }
}
