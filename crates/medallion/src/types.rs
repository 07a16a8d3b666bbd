use serde::{Deserialize, Serialize};

/// Identifies one stored document by container and blob name.
///
/// Both fields default to the empty string when missing from the JSON
/// payload: a reference without a container is skipped, one without a name is
/// reported as unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DocumentReference {
    #[serde(default)]
    pub container: String,
    #[serde(default)]
    pub name: String,
}

impl DocumentReference {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.container, self.name)
    }
}

/// Text extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub content: String,
    pub mime_type: String,
    pub metadata: Metadata,
}

/// Format-level facts gathered while extracting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_count: Option<usize>,
}

/// Overall classification of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// No reference produced an error.
    Started,
    /// At least one reference produced an error.
    CompletedWithErrors,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Started => "started",
            BatchStatus::CompletedWithErrors => "completed_with_errors",
        }
    }
}

/// Result of handling a single reference inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The reference lives outside the source container.
    Skipped,
    /// Text was extracted and written under `destination`.
    Processed { destination: String },
    /// Human-readable description of why the reference failed.
    Failed(String),
}

/// Aggregated record of one batch.
///
/// Serializes to `{"processedFiles": [...], "errors": [...], "status": "..."}`.
/// Skipped references are counted but never serialized, so a batch made only
/// of references from other containers looks exactly like an empty success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    #[serde(rename = "processedFiles")]
    processed_files: Vec<String>,
    errors: Vec<String>,
    status: BatchStatus,
    #[serde(skip)]
    skipped: usize,
}

impl BatchOutcome {
    pub(crate) fn new() -> Self {
        Self {
            processed_files: Vec::new(),
            errors: Vec::new(),
            status: BatchStatus::Started,
            skipped: 0,
        }
    }

    /// Fold one item outcome into the batch. `name` is the reference's blob name.
    pub(crate) fn record(&mut self, name: &str, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Skipped => self.skipped += 1,
            ItemOutcome::Processed { .. } => self.processed_files.push(name.to_string()),
            ItemOutcome::Failed(message) => self.errors.push(message),
        }
    }

    pub(crate) fn finalize(mut self) -> Self {
        self.status = if self.errors.is_empty() {
            BatchStatus::Started
        } else {
            BatchStatus::CompletedWithErrors
        };
        self
    }

    pub fn processed_files(&self) -> &[String] {
        &self.processed_files
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    /// Number of references skipped because they belong to another container.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total references visited, including skipped ones.
    pub fn visited(&self) -> usize {
        self.processed_files.len() + self.errors.len() + self.skipped
    }
}
