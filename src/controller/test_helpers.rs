//! Shared test helpers for creating AugmentController instances in tests.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use crate::capabilities::{BlobPublisher, FileHandle, MemoryBlobStore};
use crate::config::Config;
use crate::controller::{AugmentController, Capabilities};
use crate::error::{Error, Result};
use crate::service::{AugmentService, SubmissionPayload};
use crate::types::ArchiveHandle;

/// Bytes the fake service answers with by default
pub(crate) const ARCHIVE_BYTES: &[u8] = b"PK\x03\x04fake-archive";

/// In-process stand-in for the augmentation service
pub(crate) struct FakeService {
    calls: AtomicUsize,
    payloads: Mutex<Vec<SubmissionPayload>>,
    fail_with_status: Option<u16>,
    gate: Option<Arc<Notify>>,
}

impl FakeService {
    /// Answers every request with [`ARCHIVE_BYTES`]
    pub(crate) fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            fail_with_status: None,
            gate: None,
        }
    }

    /// Answers every request with a non-success status
    pub(crate) fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::succeeding()
        }
    }

    /// Holds each request until `gate` is notified
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) async fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads.lock().await.clone()
    }
}

#[async_trait]
impl AugmentService for FakeService {
    async fn augment(&self, payload: SubmissionPayload) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().await.push(payload);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.fail_with_status {
            Some(status) => Err(Error::ServiceStatus {
                status,
                body: "internal worker traceback".to_string(),
            }),
            None => Ok(ARCHIVE_BYTES.to_vec()),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Archive publisher that parks inside `publish` until released
pub(crate) struct GatedArchives {
    pub(crate) store: MemoryBlobStore,
    /// Notified once `publish` has been entered
    pub(crate) entered: Arc<Notify>,
    /// Notify to let `publish` finish
    pub(crate) gate: Arc<Notify>,
}

impl GatedArchives {
    pub(crate) fn new() -> Self {
        Self {
            store: MemoryBlobStore::new(),
            entered: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl BlobPublisher for GatedArchives {
    async fn publish(&self, bytes: Vec<u8>, file_name: &str) -> Result<ArchiveHandle> {
        self.entered.notify_one();
        self.gate.notified().await;
        self.store.publish(bytes, file_name).await
    }

    async fn release(&self, handle: &ArchiveHandle) {
        self.store.release(handle).await;
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// Controller plus handles on its fakes
pub(crate) struct TestController {
    pub(crate) controller: AugmentController,
    pub(crate) service: Arc<FakeService>,
    pub(crate) archives: MemoryBlobStore,
    pub(crate) previews: MemoryBlobStore,
}

/// Helper to create a test AugmentController wired to in-memory fakes.
pub(crate) fn create_test_controller(service: FakeService) -> TestController {
    let service = Arc::new(service);
    let archives = MemoryBlobStore::new();
    let previews = MemoryBlobStore::new();

    let capabilities = Capabilities {
        service: service.clone(),
        archives: Arc::new(archives.clone()),
        previews: Some(Arc::new(previews.clone())),
    };

    let controller = AugmentController::with_capabilities(Config::default(), capabilities)
        .expect("default config is valid");

    TestController {
        controller,
        service,
        archives,
        previews,
    }
}

/// In-memory JPEG-typed file whose content is its own name
pub(crate) fn image(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, "image/jpeg", name.as_bytes().to_vec())
}

/// Append `(name, label)` pairs in order
pub(crate) async fn add_labeled(controller: &AugmentController, pairs: &[(&str, &str)]) {
    let start = controller.len().await;
    controller
        .append(pairs.iter().map(|(name, _)| image(name)).collect())
        .await
        .unwrap();
    for (offset, (_, label)) in pairs.iter().enumerate() {
        controller
            .set_class_name(start + offset, *label)
            .await
            .unwrap();
    }
}

/// Display names in collection order
pub(crate) async fn names(controller: &AugmentController) -> Vec<String> {
    controller
        .entries()
        .await
        .into_iter()
        .map(|e| e.display_name)
        .collect()
}

/// Poll until the controller reports a request in flight
pub(crate) async fn wait_for_in_flight(controller: &AugmentController) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !controller.request_state().await.is_in_flight() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("request never went in flight");
}
