//! Opaque file handles and their content-read capability

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::mime::guess_mime_type;

/// Read capability behind a [`FileHandle`]
#[async_trait]
pub trait FileContent: Send + Sync {
    /// Read the full content of the file
    async fn read(&self) -> crate::Result<Vec<u8>>;

    /// Local filesystem path, if the content lives on disk
    fn local_path(&self) -> Option<&Path> {
        None
    }
}

/// Content held in memory
#[derive(Debug, Clone)]
pub struct MemoryContent(Arc<[u8]>);

impl MemoryContent {
    /// Wrap bytes that are already in memory
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }
}

#[async_trait]
impl FileContent for MemoryContent {
    async fn read(&self) -> crate::Result<Vec<u8>> {
        Ok(self.0.to_vec())
    }
}

/// Content read lazily from a file on disk
#[derive(Debug, Clone)]
pub struct PathContent {
    path: PathBuf,
}

impl PathContent {
    /// Refer to the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FileContent for PathContent {
    async fn read(&self) -> crate::Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn local_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Opaque handle to one raw file
///
/// Exposes only the name, size, MIME type and a content read. Cloning is
/// cheap and shares the underlying content.
#[derive(Clone)]
pub struct FileHandle {
    name: String,
    size_bytes: u64,
    mime_type: String,
    content: Arc<dyn FileContent>,
}

impl FileHandle {
    /// Create a handle over arbitrary content
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
        content: Arc<dyn FileContent>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Create a handle over bytes already in memory
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        let size_bytes = bytes.len() as u64;
        Self::new(
            name,
            size_bytes,
            mime_type,
            Arc::new(MemoryContent::new(bytes)),
        )
    }

    /// Create a handle over a file on disk, guessing its MIME type from the extension
    ///
    /// Unknown extensions get `application/octet-stream`.
    pub async fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = guess_mime_type(path).unwrap_or("application/octet-stream");

        Ok(Self::new(
            name,
            metadata.len(),
            mime_type,
            Arc::new(PathContent::new(path)),
        ))
    }

    /// File name as provided by the source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// MIME type as reported by the source
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Local filesystem path, if the content lives on disk
    pub fn local_path(&self) -> Option<&Path> {
        self.content.local_path()
    }

    /// Read the full content
    pub async fn read(&self) -> crate::Result<Vec<u8>> {
        self.content.read().await
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}
