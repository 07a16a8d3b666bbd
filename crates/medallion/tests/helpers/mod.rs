//! Shared fixtures for integration tests.
//!
//! Documents are generated in memory so the tests do not depend on binary
//! files checked into the repository.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use medallion::plugins::registry::DocumentExtractorRegistry;
use medallion::{BatchObserver, BatchOutcome, DocumentReference};
use parking_lot::Mutex;
use std::io::{Cursor, Write};
use std::sync::{Arc, RwLock};
use zip::write::SimpleFileOptions;

const WML_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Build a DOCX package whose body holds one paragraph per entry.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| {
            if text.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
            }
        })
        .collect();
    docx_with_body_xml(&body)
}

/// Build a DOCX package from raw `w:body` content, wired up through `_rels/.rels`
/// and `[Content_Types].xml` the way Word writes it.
pub fn docx_with_body_xml(body: &str) -> Vec<u8> {
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        WML_NAMESPACE, body
    );

    zip_package(&[
        ("[Content_Types].xml", content_types),
        ("_rels/.rels", rels),
        ("word/document.xml", &document),
    ])
}

/// Write the given (path, content) entries into a ZIP archive.
pub fn zip_package(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        for (path, content) in entries {
            zip.start_file(*path, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer.into_inner()
}

/// Build a PDF with one page per entry, each page showing its text in Helvetica.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    save_pdf(pdf_document(pages))
}

/// A one-page PDF whose trailer declares standard-handler encryption with an
/// empty user password.
pub fn encrypted_pdf(text: &str) -> Vec<u8> {
    let mut doc = pdf_document(&[text]);

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "P" => -4,
        "O" => Object::string_literal(vec![0x41u8; 32]),
        "U" => Object::string_literal(vec![0x42u8; 32]),
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal(vec![0x01u8; 16]),
            Object::string_literal(vec![0x01u8; 16]),
        ],
    );

    save_pdf(doc)
}

fn save_pdf(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn pdf_document(pages: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => font_id,
                },
            },
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Registry holding only the built-in extractors, independent of the global one.
pub fn builtin_registry() -> Arc<RwLock<DocumentExtractorRegistry>> {
    Arc::new(RwLock::new(medallion::extractors::default_registry().unwrap()))
}

/// Observer event as recorded by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Started(usize),
    Skipped(String),
    Processing(String, String),
    Processed(String, String),
    Failed(String, String),
    Finished(usize, usize),
}

/// Collects every observer event in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

impl BatchObserver for RecordingObserver {
    fn batch_started(&self, size: usize) {
        self.events.lock().push(Event::Started(size));
    }

    fn skipped(&self, reference: &DocumentReference) {
        self.events.lock().push(Event::Skipped(reference.name.clone()));
    }

    fn processing(&self, reference: &DocumentReference, format: &str) {
        self.events
            .lock()
            .push(Event::Processing(reference.name.clone(), format.to_string()));
    }

    fn processed(&self, reference: &DocumentReference, destination: &str) {
        self.events
            .lock()
            .push(Event::Processed(reference.name.clone(), destination.to_string()));
    }

    fn failed(&self, reference: &DocumentReference, message: &str) {
        self.events
            .lock()
            .push(Event::Failed(reference.name.clone(), message.to_string()));
    }

    fn batch_finished(&self, outcome: &BatchOutcome) {
        self.events
            .lock()
            .push(Event::Finished(outcome.processed_files().len(), outcome.errors().len()));
    }
}

pub fn bronze(name: &str) -> DocumentReference {
    DocumentReference::new("bronze", name)
}
