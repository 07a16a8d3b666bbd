use super::BlobStore;
use crate::{MedallionError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Blob store backed by a local directory.
///
/// `root/<container>/<name>` holds each blob; `/` in a blob name becomes a
/// nested directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn container_path(&self, container: &str) -> Result<PathBuf> {
        if container.is_empty() || container.contains(['/', '\\']) || container == "." || container == ".." {
            return Err(MedallionError::validation(format!("Invalid container name '{}'", container)));
        }
        Ok(self.root.join(container))
    }

    /// Map a blob onto its file, refusing names that would escape the container.
    fn blob_path(&self, container: &str, name: &str) -> Result<PathBuf> {
        let mut path = self.container_path(container)?;

        if name.is_empty() || name.starts_with('/') || name.contains('\\') {
            return Err(MedallionError::validation(format!("Invalid blob name '{}'", name)));
        }

        for segment in name.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    return Err(MedallionError::validation(format!(
                        "Blob name '{}' escapes its container",
                        name
                    )));
                }
                segment => path.push(segment),
            }
        }

        Ok(path)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn list_blobs(&self, container: &str) -> Result<Vec<String>> {
        let container_root = self.container_path(container)?;
        let mut names = Vec::new();
        let mut pending = vec![(container_root, String::new())];

        while let Some((dir, prefix)) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(MedallionError::Io(e)),
            };

            while let Some(entry) = entries.next_entry().await? {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                let name = format!("{}{}", prefix, file_name);

                if entry.file_type().await?.is_dir() {
                    pending.push((entry.path(), format!("{}/", name)));
                } else {
                    names.push(name);
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn get_blob_content(&self, container: &str, name: &str) -> Result<Vec<u8>> {
        let path = self.blob_path(container, name)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => Err(MedallionError::BlobNotFound {
                container: container.to_string(),
                name: name.to_string(),
            }),
            Err(e) => Err(MedallionError::Io(e)),
        }
    }

    async fn write_to_blob(&self, container: &str, name: &str, content: &[u8]) -> Result<()> {
        let path = self.blob_path(container, name)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, content).await?;
        tracing::trace!(container, name, bytes = content.len(), "Wrote blob");
        Ok(())
    }
}
