//! Batch progress notifications.
//!
//! The orchestrator reports what happens to each reference through a
//! [`BatchObserver`]. Observers only watch; they cannot change the outcome.

use crate::types::{BatchOutcome, DocumentReference};
use std::sync::Arc;

/// Receives one event per reference plus batch start/finish.
///
/// Every method has an empty default so implementations pick the events they
/// care about.
pub trait BatchObserver: Send + Sync {
    fn batch_started(&self, _size: usize) {}

    /// The reference lives outside the source container.
    fn skipped(&self, _reference: &DocumentReference) {}

    /// An extractor was found and the document is about to be fetched.
    fn processing(&self, _reference: &DocumentReference, _format: &str) {}

    fn processed(&self, _reference: &DocumentReference, _destination: &str) {}

    fn failed(&self, _reference: &DocumentReference, _message: &str) {}

    fn batch_finished(&self, _outcome: &BatchOutcome) {}
}

/// Emits a `tracing` event for everything the orchestrator does.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn batch_started(&self, size: usize) {
        tracing::info!(references = size, "Starting text extraction batch");
    }

    fn skipped(&self, reference: &DocumentReference) {
        tracing::info!(
            container = %reference.container,
            name = %reference.name,
            "Skipping blob not in source container"
        );
    }

    fn processing(&self, reference: &DocumentReference, format: &str) {
        tracing::info!(name = %reference.name, format, "Processing blob");
    }

    fn processed(&self, reference: &DocumentReference, destination: &str) {
        tracing::debug!(name = %reference.name, destination, "Wrote extracted text");
    }

    fn failed(&self, reference: &DocumentReference, message: &str) {
        tracing::error!(name = %reference.name, "{}", message);
    }

    fn batch_finished(&self, outcome: &BatchOutcome) {
        tracing::info!(
            processed = outcome.processed_files().len(),
            errors = outcome.errors().len(),
            skipped = outcome.skipped(),
            status = outcome.status().as_str(),
            "Finished text extraction batch"
        );
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

pub(crate) fn default_observer() -> Arc<dyn BatchObserver> {
    Arc::new(TracingObserver)
}
