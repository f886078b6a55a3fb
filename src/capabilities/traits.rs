//! Capability traits implemented by hosts and fakes

use async_trait::async_trait;
use url::Url;

use super::file::FileHandle;
use crate::types::ArchiveHandle;

/// Source of raw files, such as a file picker or a drop zone
///
/// Implementations apply the MIME allow-list before returning, so every
/// handle produced here is accepted into the collection as-is.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Produce the files the user selected
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying platform fails to enumerate or
    /// stat the selected files.
    async fn select(&self) -> crate::Result<Vec<FileHandle>>;
}

/// Turns a file handle into a displayable temporary URL
#[async_trait]
pub trait PreviewPublisher: Send + Sync {
    /// Publish a preview for `file`
    ///
    /// # Errors
    ///
    /// Returns `Error::NotSupported` if this publisher cannot address the
    /// file's backing content, or an I/O error if reading it fails.
    async fn publish(&self, file: &FileHandle) -> crate::Result<Url>;

    /// Revoke a preview URL previously returned by [`publish`](Self::publish)
    ///
    /// Revoking an unknown URL is a no-op.
    async fn revoke(&self, url: &Url);
}

/// Turns response bytes into a revocable local handle
///
/// At most one handle per controller is live at a time; the controller calls
/// [`release`](Self::release) before publishing a replacement.
#[async_trait]
pub trait BlobPublisher: Send + Sync {
    /// Store `bytes` and return a handle offering them under `file_name`
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be stored.
    async fn publish(&self, bytes: Vec<u8>, file_name: &str) -> crate::Result<ArchiveHandle>;

    /// Release a handle previously returned by [`publish`](Self::publish)
    ///
    /// Failures are logged, never returned: a leaked handle must not block
    /// the user from continuing.
    async fn release(&self, handle: &ArchiveHandle);

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
