//! Error types for Medallion.
//!
//! Every fallible operation in the crate returns [`MedallionError`]. The batch
//! orchestrator converts per-document errors into entries of the outcome's
//! `errors` list, so only [`MedallionError::EmptyBatch`] (and setup errors)
//! ever reach the caller of [`crate::core::batch::BatchProcessor::process_batch`].
//!
//! # Error Handling Philosophy
//!
//! **System errors bubble up unchanged:**
//! - `MedallionError::Io` (from `std::io::Error`) - file system and permission errors
//!
//! **Application errors are wrapped with context:**
//! - `Parsing` - corrupt or unreadable documents
//! - `Validation` - invalid configuration, blob names or parameters
//! - `Storage` - blob backend failures other than a missing blob
//! - `BlobNotFound` - the requested blob does not exist
//!
//! # Example
//!
//! ```rust
//! use medallion::{MedallionError, Result};
//!
//! fn require_name(name: &str) -> Result<&str> {
//!     if name.is_empty() {
//!         return Err(MedallionError::validation("Blob name cannot be empty"));
//!     }
//!     Ok(name)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `MedallionError`.
pub type Result<T> = std::result::Result<T, MedallionError>;

/// Main error type for all Medallion operations.
#[derive(Debug, Error)]
pub enum MedallionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Blob not found: {container}/{name}")]
    BlobNotFound { container: String, name: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The request carried no document references at all.
    #[error("No blobs provided.")]
    EmptyBatch,

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for MedallionError {
    fn from(err: serde_json::Error) -> Self {
        MedallionError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for MedallionError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(io_err) => MedallionError::Io(io_err),
            other => MedallionError::Parsing {
                message: format!("Invalid PDF: {}", other),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(feature = "office")]
impl From<zip::result::ZipError> for MedallionError {
    fn from(err: zip::result::ZipError) -> Self {
        MedallionError::Parsing {
            message: format!("Invalid OOXML package: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl MedallionError {
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
    error_constructor!(storage, Storage);
    error_constructor!(serialization, Serialization);

    /// Whether the error was caused by bad input rather than by the system.
    ///
    /// The HTTP layer uses this to choose between the 4xx and 5xx classes.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MedallionError::Validation { .. } | MedallionError::EmptyBatch | MedallionError::UnsupportedFormat(_)
        )
    }
}
