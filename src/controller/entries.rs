//! Ingestion, label edits, removal and drag reordering.

use url::Url;

use crate::capabilities::{FileHandle, FileSource};
use crate::drag::{DragPayload, DropEffect, DropOutcome};
use crate::error::Result;
use crate::types::{EntrySnapshot, Event, NumImages, RequestState};

use super::AugmentController;

impl AugmentController {
    /// Append files to the end of the collection, each with an empty class name
    ///
    /// A fresh ingestion invalidates the previous outcome: a failed state
    /// returns to idle and a live archive handle is released. A request that
    /// is still in flight is left alone. Returns the new collection length.
    pub async fn append(&self, files: Vec<FileHandle>) -> Result<usize> {
        let count = files.len();
        let previews = self.publish_previews(&files).await;

        let (total, previous) = {
            let mut session = match self.live_session().await {
                Ok(session) => session,
                Err(e) => {
                    self.revoke_previews(previews.into_iter().flatten()).await;
                    return Err(e);
                }
            };

            let first = session.entries.append(files);
            for (entry, preview) in session.entries.iter_mut().skip(first).zip(previews) {
                entry.set_preview(preview);
            }

            let previous = if session.request.is_in_flight() {
                RequestState::InFlight
            } else {
                std::mem::take(&mut session.request)
            };

            (session.entries.len(), previous)
        };

        self.release_archive(previous).await;

        tracing::debug!(count, total, "entries appended");
        self.emit(Event::EntriesAdded { count, total });
        Ok(total)
    }

    /// Ask `source` for files and append them
    pub async fn ingest(&self, source: &dyn FileSource) -> Result<usize> {
        let files = source.select().await?;
        self.append(files).await
    }

    /// Remove the entry at `index`
    pub async fn remove(&self, index: usize) -> Result<()> {
        let mut removed = {
            let mut session = self.live_session().await?;
            session.entries.remove(index)?
        };

        self.revoke_previews(removed.take_preview()).await;

        tracing::debug!(index, name = removed.display_name(), "entry removed");
        self.emit(Event::EntryRemoved { index });
        Ok(())
    }

    /// Overwrite the class name of the entry at `index`, verbatim
    pub async fn set_class_name(&self, index: usize, value: impl Into<String>) -> Result<()> {
        self.live_session()
            .await?
            .entries
            .set_class_name(index, value)?;

        self.emit(Event::ClassNameChanged { index });
        Ok(())
    }

    /// Splice-move the entry at `source` to `target` of the shortened sequence
    pub async fn move_entry(&self, source: usize, target: usize) -> Result<()> {
        self.live_session()
            .await?
            .entries
            .move_entry(source, target)?;

        if source != target {
            tracing::debug!(from = source, to = target, "entry moved");
            self.emit(Event::EntryMoved {
                from: source,
                to: target,
            });
        }
        Ok(())
    }

    /// Start dragging the entry at `index`
    ///
    /// The returned payload must travel with the platform gesture and be handed
    /// back to [`drop_on`](Self::drop_on).
    pub async fn drag_start(&self, index: usize) -> Result<DragPayload> {
        Ok(self.live_session().await?.drag.on_drag_start(index))
    }

    /// Drag passes over `index`
    pub async fn drag_over(&self, index: usize) -> DropEffect {
        self.session.lock().await.drag.on_drag_over(index)
    }

    /// Drop the dragged entry onto `target`
    pub async fn drop_on(&self, payload: &DragPayload, target: usize) -> Result<DropOutcome> {
        let outcome = {
            let mut guard = self.live_session().await?;
            let session = &mut *guard;
            session
                .drag
                .on_drop(payload, target, &mut session.entries)?
        };

        if let DropOutcome::Moved { from, to } = outcome {
            tracing::debug!(from, to, "entry moved by drag");
            self.emit(Event::EntryMoved { from, to });
        }
        Ok(outcome)
    }

    /// Drag ended without a drop
    pub async fn drag_cancel(&self) {
        self.session.lock().await.drag.cancel();
    }

    /// Index currently being dragged, for highlighting only
    pub async fn active_drag_index(&self) -> Option<usize> {
        self.session.lock().await.drag.active_index()
    }

    /// Set the number of images to generate per input
    pub async fn set_num_images(&self, value: u32) -> Result<()> {
        self.store_num_images(NumImages::new(value)?).await
    }

    /// Set the number of images from user-typed text
    pub async fn set_num_images_from_str(&self, value: &str) -> Result<()> {
        self.store_num_images(value.parse()?).await
    }

    async fn store_num_images(&self, value: NumImages) -> Result<()> {
        self.live_session().await?.num_images = value;
        self.emit(Event::NumImagesChanged { value: value.get() });
        Ok(())
    }

    /// Current number of images to generate per input
    pub async fn num_images(&self) -> NumImages {
        self.session.lock().await.num_images
    }

    /// Read-only view of the collection, in order
    pub async fn entries(&self) -> Vec<EntrySnapshot> {
        self.session.lock().await.entries.snapshots()
    }

    /// Number of entries in the collection
    pub async fn len(&self) -> usize {
        self.session.lock().await.entries.len()
    }

    /// Whether the collection is empty
    pub async fn is_empty(&self) -> bool {
        self.session.lock().await.entries.is_empty()
    }

    async fn publish_previews(&self, files: &[FileHandle]) -> Vec<Option<Url>> {
        let Some(previews) = &self.capabilities.previews else {
            return vec![None; files.len()];
        };

        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            match previews.publish(file).await {
                Ok(url) => urls.push(Some(url)),
                Err(e) => {
                    tracing::warn!(name = file.name(), error = %e, "preview unavailable");
                    urls.push(None);
                }
            }
        }
        urls
    }

    pub(crate) async fn revoke_previews(&self, urls: impl IntoIterator<Item = Url>) {
        let Some(previews) = &self.capabilities.previews else {
            return;
        };
        for url in urls {
            previews.revoke(&url).await;
        }
    }
}
