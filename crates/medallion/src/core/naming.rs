//! Container names and blob-name arithmetic.
//!
//! The tier layout is fixed: documents are read from [`SOURCE_CONTAINER`] and
//! their text is written to [`DESTINATION_CONTAINER`] under the document's base
//! name with [`DESTINATION_SUFFIX`] appended.

/// Container holding the raw uploaded documents.
pub const SOURCE_CONTAINER: &str = "bronze";

/// Container receiving extracted plain text.
pub const DESTINATION_CONTAINER: &str = "silver";

/// Suffix appended to the base name of every extracted document.
pub const DESTINATION_SUFFIX: &str = ".txt";

pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Final path segment of a blob name (`a/b/c.pdf` -> `c.pdf`).
pub fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Split a base name into stem and extension for destination naming.
///
/// Leading dots belong to the stem, so `.docx` keeps its whole name as the
/// stem and `archive.tar.gz` splits into `archive.tar` and `gz`.
fn split_extension(base: &str) -> (&str, Option<&str>) {
    let leading_dots = base.len() - base.trim_start_matches('.').len();
    match base[leading_dots..].rfind('.') {
        Some(idx) => {
            let dot = leading_dots + idx;
            (&base[..dot], Some(&base[dot + 1..]))
        }
        None => (base, None),
    }
}

/// Extension used to select an extractor, without the dot.
///
/// This is the text after the last dot of the base name, so a name that is
/// only a dot plus a suffix (`.docx`) still selects by that suffix. Returns
/// `None` when the base name has no dot or ends in one. Matching is
/// case-sensitive.
///
/// ```rust
/// use medallion::core::naming::file_extension;
///
/// assert_eq!(file_extension("reports/q3.docx"), Some("docx"));
/// assert_eq!(file_extension("reports/.pdf"), Some("pdf"));
/// assert_eq!(file_extension("README"), None);
/// assert_eq!(file_extension("draft."), None);
/// ```
pub fn file_extension(name: &str) -> Option<&str> {
    let base = base_name(name);
    match base.rfind('.') {
        Some(dot) if dot + 1 < base.len() => Some(&base[dot + 1..]),
        _ => None,
    }
}

/// Name of the text blob written for `name` in the destination container.
///
/// The directory part and the final extension are dropped before
/// [`DESTINATION_SUFFIX`] is appended. An empty name yields `.txt`.
///
/// ```rust
/// use medallion::core::naming::destination_name;
///
/// assert_eq!(destination_name("report.docx"), "report.txt");
/// assert_eq!(destination_name("2024/q1/summary.pdf"), "summary.txt");
/// ```
pub fn destination_name(name: &str) -> String {
    let (stem, _) = split_extension(base_name(name));
    format!("{}{}", stem, DESTINATION_SUFFIX)
}
