//! DOCX (WordprocessingML) text extraction.
//!
//! Reads the main document part of the OOXML package and returns the text of
//! each top-level body paragraph, one paragraph per line. Tables, text boxes,
//! headers, footers and notes are not part of the output.

use crate::error::{MedallionError, Result};
use roxmltree::Node;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const WML_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const OFFICE_DOCUMENT_RELATIONSHIP: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";

/// Text of a DOCX file together with its paragraph count.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxText {
    pub content: String,
    pub paragraph_count: usize,
}

/// Extract the body paragraphs of a DOCX document.
///
/// # Errors
///
/// `MedallionError::Parsing` if the bytes are not a ZIP archive, the main
/// document part is missing, or its XML is malformed.
pub fn extract_text(bytes: &[u8]) -> Result<DocxText> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let part = main_document_part(&mut archive)?;
    let xml = read_part(&mut archive, &part)?;

    let doc = roxmltree::Document::parse(&xml)
        .map_err(|e| MedallionError::parsing(format!("Failed to parse {}: {}", part, e)))?;

    let body = doc
        .root_element()
        .children()
        .find(|node| is_wml(node, "body"))
        .ok_or_else(|| MedallionError::parsing(format!("{} has no w:body element", part)))?;

    let paragraphs: Vec<String> = body
        .children()
        .filter(|node| is_wml(node, "p"))
        .map(paragraph_text)
        .collect();

    Ok(DocxText {
        paragraph_count: paragraphs.len(),
        content: paragraphs.join("\n"),
    })
}

/// Locate the main document part through `_rels/.rels`.
fn main_document_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let rels = match archive.by_name("_rels/.rels") {
        Ok(mut file) => {
            let mut content = String::new();
            file.read_to_string(&mut content)
                .map_err(|e| MedallionError::parsing(format!("Failed to read _rels/.rels: {}", e)))?;
            content
        }
        Err(_) => return Ok(DEFAULT_DOCUMENT_PART.to_string()),
    };

    let doc = roxmltree::Document::parse(&rels)
        .map_err(|e| MedallionError::parsing(format!("Failed to parse _rels/.rels: {}", e)))?;

    let target = doc
        .descendants()
        .filter(|node| node.has_tag_name("Relationship"))
        .find(|node| node.attribute("Type") == Some(OFFICE_DOCUMENT_RELATIONSHIP))
        .and_then(|node| node.attribute("Target"));

    Ok(match target {
        Some(target) => target.trim_start_matches('/').to_string(),
        None => DEFAULT_DOCUMENT_PART.to_string(),
    })
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, part: &str) -> Result<String> {
    let mut file = archive
        .by_name(part)
        .map_err(|_| MedallionError::parsing(format!("DOCX package has no {} part", part)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| MedallionError::parsing(format!("Failed to read {}: {}", part, e)))?;
    Ok(content)
}

fn is_wml(node: &Node, local_name: &str) -> bool {
    node.is_element() && node.tag_name().name() == local_name && node.tag_name().namespace() == Some(WML_NAMESPACE)
}

/// Concatenate the runs of one paragraph.
fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    collect_runs(paragraph, &mut text);
    text
}

fn collect_runs(node: Node, out: &mut String) {
    for child in node.children().filter(|n| n.is_element()) {
        // Drawings and markup-compatibility blocks hold no body text.
        if child.tag_name().namespace() != Some(WML_NAMESPACE) {
            continue;
        }

        match child.tag_name().name() {
            "t" => out.push_str(child.text().unwrap_or("")),
            "tab" => out.push('\t'),
            "br" | "cr" => out.push('\n'),
            "txbxContent" | "pPr" | "rPr" | "delText" => {}
            _ => collect_runs(child, out),
        }
    }
}
