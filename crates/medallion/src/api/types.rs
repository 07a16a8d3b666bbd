//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::core::batch::BatchProcessor;
use crate::types::DocumentReference;

/// API server size limit configuration.
///
/// The processing endpoint only receives JSON references, never document
/// bytes, so the default is small.
///
/// # Examples
///
/// ```
/// use medallion::api::ApiSizeLimits;
///
/// let limits = ApiSizeLimits::from_mb(2);
/// assert_eq!(limits.max_request_body_bytes, 2 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiSizeLimits {
    /// Maximum size of the entire request body in bytes. Default: 10 MB.
    pub max_request_body_bytes: usize,
}

impl Default for ApiSizeLimits {
    fn default() -> Self {
        Self {
            max_request_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiSizeLimits {
    pub fn new(max_request_body_bytes: usize) -> Self {
        Self { max_request_body_bytes }
    }

    pub fn from_mb(max_request_body_mb: usize) -> Self {
        Self {
            max_request_body_bytes: max_request_body_mb * 1024 * 1024,
        }
    }
}

/// Body of `POST /process`.
///
/// `blobs` may be missing or `null`; both are treated like an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub blobs: Option<Vec<DocumentReference>>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One document format the server can extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatInfo {
    /// File extension without the dot
    pub extension: String,
    /// Label used in error messages, e.g. `PDF`
    pub format: String,
    /// Name of the extractor plugin selected for the extension
    pub extractor: String,
}

/// Server information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub version: String,
    pub source_container: String,
    pub destination_container: String,
    pub formats: Vec<FormatInfo>,
}

/// Response of `GET /containers/{container}/blobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobListResponse {
    pub container: String,
    pub blobs: Vec<String>,
}

/// Error response body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API server state.
#[derive(Clone)]
pub struct ApiState {
    pub processor: BatchProcessor,
}
