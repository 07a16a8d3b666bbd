//! End-to-end batch tests against in-memory and filesystem stores.

#![cfg(all(feature = "office", feature = "pdf"))]

use async_trait::async_trait;
use medallion::plugins::registry::DocumentExtractorRegistry;
use medallion::plugins::{DocumentExtractor, Plugin};
use medallion::types::{BatchStatus, ExtractionResult, Metadata};
use medallion::{
    BatchProcessor, BlobStore, DocumentReference, EmptyTextPolicy, FsBlobStore, MedallionError, MemoryBlobStore,
    Result,
};
use serde_json::json;
use std::sync::{Arc, RwLock};

mod helpers;

use helpers::{Event, RecordingObserver, bronze, builtin_registry, docx_with_paragraphs, pdf_with_pages};

fn processor_over(store: Arc<MemoryBlobStore>) -> BatchProcessor {
    BatchProcessor::new(store)
        .unwrap()
        .with_registry(builtin_registry())
}

fn text_of(store: &MemoryBlobStore, name: &str) -> Option<String> {
    store
        .get("silver", name)
        .map(|bytes| String::from_utf8(bytes).unwrap())
}

#[tokio::test]
async fn test_docx_written_to_silver() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "report.docx", docx_with_paragraphs(&["Hello", "World"]));

    let outcome = processor_over(store.clone())
        .process_batch(&[bronze("report.docx")])
        .await
        .unwrap();

    assert_eq!(text_of(&store, "report.txt").as_deref(), Some("Hello\nWorld"));
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"processedFiles": ["report.docx"], "errors": [], "status": "started"})
    );
}

#[tokio::test]
async fn test_dot_only_names_dispatch_by_suffix() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", ".docx", docx_with_paragraphs(&["Hidden"]));
    store.insert("bronze", "reports/.pdf", pdf_with_pages(&["Dotted"]));

    let outcome = processor_over(store.clone())
        .process_batch(&[bronze(".docx"), bronze("reports/.pdf")])
        .await
        .unwrap();

    assert_eq!(outcome.processed_files(), &[".docx".to_string(), "reports/.pdf".to_string()]);
    assert!(outcome.errors().is_empty());
    assert_eq!(text_of(&store, ".docx.txt").as_deref(), Some("Hidden"));
    assert!(text_of(&store, ".pdf.txt").unwrap().contains("Dotted"));
}

#[tokio::test]
async fn test_unsupported_extension_reported() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "x.csv", b"a,b\n1,2\n".to_vec());

    let outcome = processor_over(store.clone())
        .process_batch(&[bronze("x.csv")])
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "processedFiles": [],
            "errors": ["Unsupported file type: x.csv"],
            "status": "completed_with_errors",
        })
    );
    assert!(store.get("silver", "x.txt").is_none());
}

#[tokio::test]
async fn test_other_container_skipped_silently() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("other", "a.pdf", pdf_with_pages(&["ignored"]));
    let observer = Arc::new(RecordingObserver::default());

    let outcome = processor_over(store.clone())
        .with_observer(observer.clone())
        .process_batch(&[DocumentReference::new("other", "a.pdf")])
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"processedFiles": [], "errors": [], "status": "started"})
    );
    assert_eq!(outcome.skipped(), 1);
    assert!(store.get("silver", "a.txt").is_none());
    assert!(observer.events().contains(&Event::Skipped("a.pdf".to_string())));
}

#[tokio::test]
async fn test_empty_batch_fails_request() {
    let store = Arc::new(MemoryBlobStore::new());

    let err = processor_over(store.clone()).process_batch(&[]).await.unwrap_err();

    assert!(matches!(err, MedallionError::EmptyBatch));
    assert_eq!(err.to_string(), "No blobs provided.");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_mixed_batch_with_corrupt_pdf() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "memo.docx", docx_with_paragraphs(&["Memo"]));
    store.insert("bronze", "broken.pdf", b"%PDF-1.7 truncated garbage".to_vec());

    let outcome = processor_over(store.clone())
        .process_batch(&[bronze("memo.docx"), bronze("broken.pdf")])
        .await
        .unwrap();

    assert_eq!(outcome.processed_files(), &["memo.docx".to_string()]);
    assert_eq!(outcome.errors().len(), 1);
    assert!(
        outcome.errors()[0].starts_with("Failed to extract text from PDF: broken.pdf: "),
        "unexpected error: {}",
        outcome.errors()[0]
    );
    assert_eq!(outcome.status(), BatchStatus::CompletedWithErrors);
    assert!(store.get("silver", "broken.txt").is_none());
    assert_eq!(text_of(&store, "memo.txt").as_deref(), Some("Memo"));
}

#[tokio::test]
async fn test_pdf_pages_extracted_in_order() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "scans/minutes.pdf", pdf_with_pages(&["First page", "Second page"]));

    let outcome = processor_over(store.clone())
        .process_batch(&[bronze("scans/minutes.pdf")])
        .await
        .unwrap();

    assert_eq!(outcome.processed_files(), &["scans/minutes.pdf".to_string()]);

    let text = text_of(&store, "minutes.txt").unwrap();
    let first = text.find("First page").expect("first page text");
    let second = text.find("Second page").expect("second page text");
    assert!(first < second);
}

#[tokio::test]
async fn test_missing_blob_is_item_error() {
    let store = Arc::new(MemoryBlobStore::new());

    let outcome = processor_over(store)
        .process_batch(&[bronze("ghost.docx")])
        .await
        .unwrap();

    assert_eq!(
        outcome.errors(),
        &["Error processing ghost.docx: Blob not found: bronze/ghost.docx".to_string()]
    );
}

#[tokio::test]
async fn test_every_reference_visited_once() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "a.docx", docx_with_paragraphs(&["a"]));
    store.insert("bronze", "b.pdf", pdf_with_pages(&["b"]));

    let references = vec![
        bronze("a.docx"),
        DocumentReference::new("raw", "a.docx"),
        bronze("b.pdf"),
        bronze("notes.txt"),
        bronze("README"),
        DocumentReference::default(),
        bronze("missing.pdf"),
    ];

    let outcome = processor_over(store)
        .process_batch(&references)
        .await
        .unwrap();

    assert_eq!(outcome.visited(), references.len());
    assert_eq!(outcome.processed_files().len(), 2);
    assert_eq!(outcome.skipped(), 2);
    assert_eq!(outcome.errors().len(), 3);
}

#[tokio::test]
async fn test_processed_files_follow_input_order() {
    let store = Arc::new(MemoryBlobStore::new());
    for name in ["c.docx", "a.docx", "b.docx"] {
        store.insert("bronze", name, docx_with_paragraphs(&[name]));
    }

    let outcome = processor_over(store)
        .process_batch(&[bronze("c.docx"), bronze("a.docx"), bronze("b.docx")])
        .await
        .unwrap();

    assert_eq!(
        outcome.processed_files(),
        &["c.docx".to_string(), "a.docx".to_string(), "b.docx".to_string()]
    );
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "report.docx", docx_with_paragraphs(&["Hello"]));
    store.insert("bronze", "bad.pdf", b"nope".to_vec());
    let processor = processor_over(store.clone());
    let batch = [bronze("report.docx"), bronze("bad.pdf"), bronze("x.csv")];

    let first = processor.process_batch(&batch).await.unwrap();
    let silver_after_first = text_of(&store, "report.txt");
    let second = processor.process_batch(&batch).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(text_of(&store, "report.txt"), silver_after_first);
}

#[tokio::test]
async fn test_same_basename_last_write_wins() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "2023/summary.docx", docx_with_paragraphs(&["old"]));
    store.insert("bronze", "2024/summary.docx", docx_with_paragraphs(&["new"]));

    let outcome = processor_over(store.clone())
        .process_batch(&[bronze("2023/summary.docx"), bronze("2024/summary.docx")])
        .await
        .unwrap();

    assert_eq!(outcome.processed_files().len(), 2);
    assert_eq!(text_of(&store, "summary.txt").as_deref(), Some("new"));
}

#[tokio::test]
async fn test_observer_sees_each_step() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "report.docx", docx_with_paragraphs(&["Hello"]));
    let observer = Arc::new(RecordingObserver::default());

    processor_over(store)
        .with_observer(observer.clone())
        .process_batch(&[
            DocumentReference::new("gold", "x.pdf"),
            bronze("report.docx"),
            bronze("x.csv"),
        ])
        .await
        .unwrap();

    assert_eq!(
        observer.events(),
        vec![
            Event::Started(3),
            Event::Skipped("x.pdf".to_string()),
            Event::Processing("report.docx".to_string(), "DOCX".to_string()),
            Event::Processed("report.docx".to_string(), "report.txt".to_string()),
            Event::Failed("x.csv".to_string(), "Unsupported file type: x.csv".to_string()),
            Event::Finished(1, 1),
        ]
    );
}

#[tokio::test]
async fn test_empty_document_policy() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "blank.docx", docx_with_paragraphs(&[]));

    let accepted = processor_over(store.clone())
        .process_batch(&[bronze("blank.docx")])
        .await
        .unwrap();
    assert_eq!(accepted.processed_files(), &["blank.docx".to_string()]);
    assert_eq!(text_of(&store, "blank.txt").as_deref(), Some(""));

    let rejecting_store = Arc::new(MemoryBlobStore::new());
    rejecting_store.insert("bronze", "blank.docx", docx_with_paragraphs(&[]));

    let rejected = processor_over(rejecting_store.clone())
        .with_empty_text_policy(EmptyTextPolicy::Reject)
        .process_batch(&[bronze("blank.docx")])
        .await
        .unwrap();
    assert_eq!(
        rejected.errors(),
        &["Failed to extract text from DOCX: blank.docx: document contains no text".to_string()]
    );
    assert!(rejecting_store.get("silver", "blank.txt").is_none());
}

/// Store whose writes always fail.
struct ReadOnlyStore {
    inner: MemoryBlobStore,
}

#[async_trait]
impl BlobStore for ReadOnlyStore {
    async fn list_blobs(&self, container: &str) -> Result<Vec<String>> {
        self.inner.list_blobs(container).await
    }

    async fn get_blob_content(&self, container: &str, name: &str) -> Result<Vec<u8>> {
        self.inner.get_blob_content(container, name).await
    }

    async fn write_to_blob(&self, _container: &str, _name: &str, _content: &[u8]) -> Result<()> {
        Err(MedallionError::storage("container is read-only"))
    }
}

#[tokio::test]
async fn test_write_failure_is_item_error() {
    let inner = MemoryBlobStore::new();
    inner.insert("bronze", "a.docx", docx_with_paragraphs(&["a"]));
    inner.insert("bronze", "b.docx", docx_with_paragraphs(&["b"]));
    let store = Arc::new(ReadOnlyStore { inner });

    let outcome = BatchProcessor::new(store)
        .unwrap()
        .with_registry(builtin_registry())
        .process_batch(&[bronze("a.docx"), bronze("b.docx")])
        .await
        .unwrap();

    assert!(outcome.processed_files().is_empty());
    assert_eq!(
        outcome.errors(),
        &[
            "Error processing a.docx: Storage error: container is read-only".to_string(),
            "Error processing b.docx: Storage error: container is read-only".to_string(),
        ]
    );
}

struct PanickingExtractor;

impl Plugin for PanickingExtractor {
    fn name(&self) -> &str {
        "panicking-extractor"
    }

    fn version(&self) -> String {
        "0.0.1".to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl DocumentExtractor for PanickingExtractor {
    async fn extract_bytes(&self, _content: &[u8]) -> Result<ExtractionResult> {
        panic!("extractor exploded");
    }

    fn supported_extensions(&self) -> &[&str] {
        &["boom"]
    }

    fn format_label(&self) -> &str {
        "BOOM"
    }
}

struct UppercaseExtractor;

impl Plugin for UppercaseExtractor {
    fn name(&self) -> &str {
        "uppercase-extractor"
    }

    fn version(&self) -> String {
        "0.0.1".to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl DocumentExtractor for UppercaseExtractor {
    async fn extract_bytes(&self, content: &[u8]) -> Result<ExtractionResult> {
        Ok(ExtractionResult {
            content: String::from_utf8_lossy(content).to_uppercase(),
            mime_type: "text/markdown".to_string(),
            metadata: Metadata::default(),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["md"]
    }

    fn format_label(&self) -> &str {
        "Markdown"
    }
}

#[tokio::test]
async fn test_panic_in_one_reference_does_not_stop_batch() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "bad.boom", b"x".to_vec());
    store.insert("bronze", "good.docx", docx_with_paragraphs(&["fine"]));

    let mut registry = medallion::extractors::default_registry().unwrap();
    registry.register(Arc::new(PanickingExtractor)).unwrap();

    let outcome = BatchProcessor::new(store.clone())
        .unwrap()
        .with_registry(Arc::new(RwLock::new(registry)))
        .process_batch(&[bronze("bad.boom"), bronze("good.docx")])
        .await
        .unwrap();

    assert_eq!(outcome.processed_files(), &["good.docx".to_string()]);
    assert_eq!(
        outcome.errors(),
        &["Error processing bad.boom: task panicked: extractor exploded".to_string()]
    );
}

#[tokio::test]
async fn test_registered_format_needs_no_orchestrator_change() {
    let store = Arc::new(MemoryBlobStore::new());
    store.insert("bronze", "notes.md", b"# shout".to_vec());

    let mut registry = DocumentExtractorRegistry::new();
    registry.register(Arc::new(UppercaseExtractor)).unwrap();

    let outcome = BatchProcessor::new(store.clone())
        .unwrap()
        .with_registry(Arc::new(RwLock::new(registry)))
        .process_batch(&[bronze("notes.md"), bronze("report.docx")])
        .await
        .unwrap();

    assert_eq!(outcome.processed_files(), &["notes.md".to_string()]);
    assert_eq!(outcome.errors(), &["Unsupported file type: report.docx".to_string()]);
    assert_eq!(text_of(&store, "notes.txt").as_deref(), Some("# SHOUT"));
}

#[tokio::test]
async fn test_filesystem_store_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FsBlobStore::new(dir.path()));
    store
        .write_to_blob("bronze", "inbox/letter.docx", &docx_with_paragraphs(&["Dear reader", "", "Regards"]))
        .await
        .unwrap();

    let outcome = BatchProcessor::new(store.clone())
        .unwrap()
        .with_registry(builtin_registry())
        .process_batch(&[bronze("inbox/letter.docx")])
        .await
        .unwrap();

    assert_eq!(outcome.status(), BatchStatus::Started);
    let written = std::fs::read_to_string(dir.path().join("silver").join("letter.txt")).unwrap();
    assert_eq!(written, "Dear reader\n\nRegards");
    assert_eq!(store.list_blobs("silver").await.unwrap(), vec!["letter.txt".to_string()]);
}
