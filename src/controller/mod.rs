//! Controller owning one labeling session, split into focused submodules.
//!
//! The `AugmentController` struct and its methods are organized by domain:
//! - [`entries`] - Ingestion, label edits, removal and drag reordering
//! - [`submit`] - Validation gate and the single outbound request
//! - [`lifecycle`] - Teardown and resource release

mod entries;
mod lifecycle;
mod submit;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, broadcast};
use tokio_util::sync::CancellationToken;

use crate::capabilities::{BlobPublisher, DirectoryBlobPublisher, PreviewPublisher};
use crate::collection::EntryCollection;
use crate::config::Config;
use crate::drag::DragReorderMachine;
use crate::error::{Error, Result};
use crate::service::{AugmentService, HttpAugmentService};
use crate::types::{Event, NumImages, RequestState};

/// Platform capabilities the controller is wired to
#[derive(Clone)]
pub struct Capabilities {
    /// Sends the submission payload
    pub service: Arc<dyn AugmentService>,
    /// Turns response bytes into a downloadable handle
    pub archives: Arc<dyn BlobPublisher>,
    /// Publishes entry previews; `None` disables previews
    pub previews: Option<Arc<dyn PreviewPublisher>>,
}

/// Everything one session mutates, guarded by a single lock
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub(crate) entries: EntryCollection,
    pub(crate) num_images: NumImages,
    pub(crate) request: RequestState,
    pub(crate) drag: DragReorderMachine,
    pub(crate) torn_down: bool,
}

/// Main controller instance (cloneable - all fields are Arc-wrapped)
///
/// Every mutation goes through a named operation, and every state change is
/// broadcast as an [`Event`]. The session lock is never held across the
/// network request, so edits stay responsive while a submission is in flight.
#[derive(Clone)]
pub struct AugmentController {
    /// Collection, configuration value, request state and drag state
    pub(crate) session: Arc<Mutex<Session>>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Injected platform capabilities
    pub(crate) capabilities: Capabilities,
    /// Cancelled on teardown to abandon an in-flight request
    pub(crate) teardown_token: CancellationToken,
}

impl AugmentController {
    /// Create a controller talking HTTP to the configured service
    ///
    /// Archives are written under `download.archive_dir`; previews are disabled.
    pub fn new(config: Config) -> Result<Self> {
        let capabilities = Capabilities {
            service: Arc::new(HttpAugmentService::new(&config.service)?),
            archives: Arc::new(DirectoryBlobPublisher::new(
                config.download.archive_dir.clone(),
            )),
            previews: None,
        };
        Self::with_capabilities(config, capabilities)
    }

    /// Create a controller wired to caller-supplied capabilities
    pub fn with_capabilities(config: Config, capabilities: Capabilities) -> Result<Self> {
        config.validate()?;

        // Create broadcast channel with buffer size of 256 events
        let (event_tx, _rx) = broadcast::channel(256);

        let session = Session {
            num_images: config.initial_num_images(),
            ..Session::default()
        };

        tracing::debug!(
            endpoint = %config.service.endpoint,
            archives = capabilities.archives.name(),
            service = capabilities.service.name(),
            previews = capabilities.previews.is_some(),
            "controller created"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            event_tx,
            config: Arc::new(config),
            capabilities,
            teardown_token: CancellationToken::new(),
        })
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Configuration the controller was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current request state
    pub async fn request_state(&self) -> RequestState {
        self.session.lock().await.request.clone()
    }

    /// Lock the session, refusing once the controller is torn down
    pub(crate) async fn live_session(&self) -> Result<MutexGuard<'_, Session>> {
        let session = self.session.lock().await;
        if session.torn_down {
            return Err(Error::TornDown);
        }
        Ok(session)
    }

    /// Release the archive held by a replaced request state, if any
    pub(crate) async fn release_archive(&self, previous: RequestState) {
        if let RequestState::Succeeded(handle) = previous {
            self.capabilities.archives.release(&handle).await;
            tracing::debug!(url = %handle.url, "archive handle released");
            self.emit(Event::ArchiveReleased { url: handle.url });
        }
    }

    pub(crate) fn emit(&self, event: Event) {
        // No subscribers is fine
        self.event_tx.send(event).ok();
    }
}
