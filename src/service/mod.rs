//! Outbound request to the augmentation service
//!
//! - [`SubmissionPayload`] - the collection flattened into positional `files`/`class_names` pairs
//! - [`AugmentService`] - the seam the controller sends payloads through
//! - [`HttpAugmentService`] - multipart POST over reqwest

mod http;

pub use http::HttpAugmentService;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::capabilities::FileHandle;
use crate::collection::EntryCollection;
use crate::error::Result;
use crate::types::NumImages;

/// One file as sent in the `files` field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadFile {
    /// File name sent with the part
    pub file_name: String,
    /// Content type sent with the part
    pub mime_type: String,
    /// File content
    pub bytes: Vec<u8>,
}

/// Everything a single submission sends
///
/// `files[i]` and `class_names[i]` describe the same entry; pairing is by
/// position only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionPayload {
    /// Files in collection order
    pub files: Vec<PayloadFile>,
    /// Class names in collection order, verbatim
    pub class_names: Vec<String>,
    /// Augmented images to generate per input
    pub num_images: NumImages,
}

impl SubmissionPayload {
    /// Read every file and pair it with its label, preserving order
    ///
    /// Contents are read concurrently; the first read failure aborts the build.
    pub async fn from_entries(
        entries: Vec<(FileHandle, String)>,
        num_images: NumImages,
    ) -> Result<Self> {
        let (handles, class_names): (Vec<_>, Vec<_>) = entries.into_iter().unzip();

        let files = try_join_all(handles.iter().map(|handle| async move {
            Ok::<_, crate::Error>(PayloadFile {
                file_name: handle.name().to_string(),
                mime_type: handle.mime_type().to_string(),
                bytes: handle.read().await?,
            })
        }))
        .await?;

        Ok(Self {
            files,
            class_names,
            num_images,
        })
    }

    /// Build the payload straight from a collection
    pub async fn from_collection(
        collection: &EntryCollection,
        num_images: NumImages,
    ) -> Result<Self> {
        let entries = collection
            .iter()
            .map(|e| (e.payload().clone(), e.class_name().to_string()))
            .collect();
        Self::from_entries(entries, num_images).await
    }

    /// Number of entries carried
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the payload carries no entries
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total bytes of file content
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes.len() as u64).sum()
    }

    /// Encode as multipart form data
    ///
    /// Emits every `files` part, then every `class_names` part, then `num_images`.
    pub fn into_form(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();

        for file in self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)?;
            form = form.part("files", part);
        }

        for class_name in self.class_names {
            form = form.text("class_names", class_name);
        }

        Ok(form.text("num_images", self.num_images.to_string()))
    }
}

/// Sends one payload and returns the archive bytes
#[async_trait]
pub trait AugmentService: Send + Sync {
    /// Submit `payload` and return the raw response body
    ///
    /// # Errors
    ///
    /// Returns an error on any transport failure or non-success response.
    /// Callers must not surface the error text to end users.
    async fn augment(&self, payload: SubmissionPayload) -> Result<Vec<u8>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
