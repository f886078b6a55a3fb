//! In-process `blob:` URL store

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use url::Url;

use super::file::FileHandle;
use super::traits::{BlobPublisher, PreviewPublisher};
use crate::error::{Error, Result};
use crate::types::ArchiveHandle;

/// `blob:` URL store backed by an in-process map
///
/// Serves both as preview publisher and archive publisher. Every published
/// URL stays live until it is revoked or released, which makes leaks
/// observable through [`live_count`](Self::live_count).
///
/// # Examples
///
/// ```
/// use augment_uploader::capabilities::{BlobPublisher, MemoryBlobStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryBlobStore::new();
/// let handle = store.publish(b"PK".to_vec(), "augmented_data.zip").await?;
/// assert_eq!(store.live_count().await, 1);
///
/// store.release(&handle).await;
/// assert_eq!(store.live_count().await, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<Url, Vec<u8>>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URLs currently live
    pub async fn live_count(&self) -> usize {
        self.blobs.lock().await.len()
    }

    /// Bytes behind a live URL
    pub async fn get(&self, url: &Url) -> Option<Vec<u8>> {
        self.blobs.lock().await.get(url).cloned()
    }

    /// Whether `url` is still live
    pub async fn contains(&self, url: &Url) -> bool {
        self.blobs.lock().await.contains_key(url)
    }

    async fn insert(&self, bytes: Vec<u8>, name: &str) -> Result<Url> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let url = Url::parse(&format!(
            "blob:augment-uploader/{}/{}",
            id,
            urlencoding::encode(name)
        ))
        .map_err(|e| Error::Other(format!("failed to build blob URL: {}", e)))?;

        self.blobs.lock().await.insert(url.clone(), bytes);
        Ok(url)
    }

    async fn remove(&self, url: &Url) -> bool {
        self.blobs.lock().await.remove(url).is_some()
    }
}

#[async_trait]
impl PreviewPublisher for MemoryBlobStore {
    async fn publish(&self, file: &FileHandle) -> Result<Url> {
        let bytes = file.read().await?;
        self.insert(bytes, file.name()).await
    }

    async fn revoke(&self, url: &Url) {
        if !self.remove(url).await {
            tracing::debug!(url = %url, "revoke of unknown preview URL ignored");
        }
    }
}

#[async_trait]
impl BlobPublisher for MemoryBlobStore {
    async fn publish(&self, bytes: Vec<u8>, file_name: &str) -> Result<ArchiveHandle> {
        let size_bytes = bytes.len() as u64;
        let url = self.insert(bytes, file_name).await?;

        Ok(ArchiveHandle {
            url,
            file_name: file_name.to_string(),
            size_bytes,
            created_at: Utc::now(),
        })
    }

    async fn release(&self, handle: &ArchiveHandle) {
        if !self.remove(&handle.url).await {
            tracing::warn!(url = %handle.url, "release of unknown archive handle ignored");
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
