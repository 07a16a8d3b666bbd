//! Blob storage abstraction.
//!
//! Documents live in named containers; a blob is addressed by its container
//! and a `/`-separated name. [`FsBlobStore`] maps containers onto directories
//! and [`MemoryBlobStore`] keeps everything in process.

use crate::Result;
use async_trait::async_trait;

mod fs;
mod memory;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

/// Read/write access to containers of blobs.
///
/// Implementations are shared between concurrent batches, so all methods take
/// `&self`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Names of every blob in `container`, sorted. A container that does not
    /// exist is empty.
    async fn list_blobs(&self, container: &str) -> Result<Vec<String>>;

    /// Full content of one blob.
    ///
    /// # Errors
    ///
    /// `MedallionError::BlobNotFound` if the blob does not exist.
    async fn get_blob_content(&self, container: &str, name: &str) -> Result<Vec<u8>>;

    /// Create or overwrite one blob.
    async fn write_to_blob(&self, container: &str, name: &str, content: &[u8]) -> Result<()>;
}
