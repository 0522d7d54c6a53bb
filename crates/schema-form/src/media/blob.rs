//! Blob sources for uploads.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::MediaError;

/// A user-selected file whose bytes can be read asynchronously.
#[async_trait]
pub trait FileBlob: Send + Sync {
    /// File name as reported by the picker, e.g. `report.pdf`.
    fn name(&self) -> &str;

    /// MIME type as reported by the picker. May be empty.
    fn mime_type(&self) -> &str;

    async fn read(&self) -> Result<Vec<u8>, MediaError>;
}

/// A blob already held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InMemoryFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl FileBlob for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn read(&self) -> Result<Vec<u8>, MediaError> {
        Ok(self.bytes.clone())
    }
}

/// A blob backed by a file on disk, read when the upload is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    mime_type: String,
}

impl DiskFile {
    /// The display name is the final path component.
    pub fn new(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            mime_type: mime_type.into(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl FileBlob for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn read(&self) -> Result<Vec<u8>, MediaError> {
        tokio::fs::read(&self.path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                MediaError::Unavailable {
                    name: self.name.clone(),
                }
            } else {
                MediaError::Read {
                    name: self.name.clone(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disk_file_reads_bytes() {
        let path =
            std::env::temp_dir().join(format!("schema-form-blob-{}.bin", std::process::id()));
        tokio::fs::write(&path, b"abc").await.unwrap();
        let file = DiskFile::new(&path, "application/octet-stream");
        assert!(file.name().starts_with("schema-form-blob-"));
        assert_eq!(file.read().await.unwrap(), b"abc");
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_disk_file_is_unavailable() {
        let file = DiskFile::new("/definitely/not/here.png", "image/png");
        assert!(matches!(
            file.read().await,
            Err(MediaError::Unavailable { name }) if name == "here.png"
        ));
    }
}
