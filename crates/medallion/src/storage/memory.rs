use super::BlobStore;
use crate::{MedallionError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

type BlobKey = (String, String);

/// In-process blob store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<BTreeMap<BlobKey, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a blob synchronously.
    pub fn insert(&self, container: impl Into<String>, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.blobs
            .write()
            .insert((container.into(), name.into()), content.into());
    }

    /// Synchronous read of one blob.
    pub fn get(&self, container: &str, name: &str) -> Option<Vec<u8>> {
        self.blobs
            .read()
            .get(&(container.to_string(), name.to_string()))
            .cloned()
    }

    /// Number of blobs across all containers.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn list_blobs(&self, container: &str) -> Result<Vec<String>> {
        Ok(self
            .blobs
            .read()
            .keys()
            .filter(|(c, _)| c == container)
            .map(|(_, name)| name.clone())
            .collect())
    }

    async fn get_blob_content(&self, container: &str, name: &str) -> Result<Vec<u8>> {
        self.get(container, name).ok_or_else(|| MedallionError::BlobNotFound {
            container: container.to_string(),
            name: name.to_string(),
        })
    }

    async fn write_to_blob(&self, container: &str, name: &str, content: &[u8]) -> Result<()> {
        self.insert(container, name, content);
        Ok(())
    }
}
