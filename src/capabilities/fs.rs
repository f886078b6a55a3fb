//! Filesystem-backed capabilities

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

use super::file::FileHandle;
use super::mime::{MimeFilter, guess_mime_type};
use super::traits::{BlobPublisher, FileSource, PreviewPublisher};
use crate::config::is_plain_file_name;
use crate::error::{Error, Result};
use crate::types::ArchiveHandle;

/// File source over a fixed list of paths
///
/// Stands in for a native picker: files whose guessed MIME type is not on the
/// allow-list are dropped here, before they reach the collection.
#[derive(Clone, Debug)]
pub struct PathFileSource {
    paths: Vec<PathBuf>,
    filter: MimeFilter,
}

impl PathFileSource {
    /// Create a source yielding `paths` that pass `filter`
    pub fn new(paths: Vec<PathBuf>, filter: MimeFilter) -> Self {
        Self { paths, filter }
    }
}

#[async_trait]
impl FileSource for PathFileSource {
    async fn select(&self) -> Result<Vec<FileHandle>> {
        let mut files = Vec::with_capacity(self.paths.len());

        for path in &self.paths {
            let accepted = guess_mime_type(path).is_some_and(|mime| self.filter.accepts(mime));
            if !accepted {
                tracing::debug!(path = ?path, "file rejected by MIME allow-list");
                continue;
            }
            files.push(FileHandle::from_path(path).await?);
        }

        Ok(files)
    }
}

/// Preview publisher handing out `file://` URLs for path-backed files
///
/// Nothing is copied, so revocation is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileUrlPreviewPublisher;

#[async_trait]
impl PreviewPublisher for FileUrlPreviewPublisher {
    async fn publish(&self, file: &FileHandle) -> Result<Url> {
        let path = file.local_path().ok_or_else(|| {
            Error::NotSupported(format!(
                "file '{}' has no local path to preview",
                file.name()
            ))
        })?;
        file_url(path)
    }

    async fn revoke(&self, _url: &Url) {}
}

/// Archive publisher writing each archive into its own directory
///
/// Archives land at `<root>/<stamp>-<seq>/<file_name>` so the offered file
/// name can stay fixed while several sessions share one root.
#[derive(Clone, Debug)]
pub struct DirectoryBlobPublisher {
    root: PathBuf,
    next_id: Arc<AtomicU64>,
}

impl DirectoryBlobPublisher {
    /// Publish archives under `root`, created on first use
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Root directory archives are written under
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobPublisher for DirectoryBlobPublisher {
    async fn publish(&self, bytes: Vec<u8>, file_name: &str) -> Result<ArchiveHandle> {
        // release removes the archive's parent directory wholesale
        if !is_plain_file_name(file_name) {
            return Err(Error::Other(format!(
                "archive file name '{}' must not contain path components",
                file_name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let dir = self
            .root
            .join(format!("{}-{}", Utc::now().timestamp_millis(), id));
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(file_name);
        let size_bytes = bytes.len() as u64;
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = ?path, size_bytes, "archive written");

        Ok(ArchiveHandle {
            url: file_url(&path)?,
            file_name: file_name.to_string(),
            size_bytes,
            created_at: Utc::now(),
        })
    }

    async fn release(&self, handle: &ArchiveHandle) {
        let Ok(path) = handle.url.to_file_path() else {
            tracing::warn!(url = %handle.url, "archive handle is not a file URL");
            return;
        };

        let root = std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone());

        // Only the per-archive directory we created is removed wholesale
        let result = match path.parent() {
            Some(dir) if dir != root && dir.starts_with(&root) => {
                tokio::fs::remove_dir_all(dir).await
            }
            _ => tokio::fs::remove_file(&path).await,
        };

        if let Err(e) = result {
            tracing::warn!(path = ?path, error = %e, "failed to remove released archive");
        }
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

fn file_url(path: &Path) -> Result<Url> {
    let absolute = std::path::absolute(path)?;
    Url::from_file_path(&absolute)
        .map_err(|_| Error::Other(format!("cannot express {} as a file URL", absolute.display())))
}
