//! Common test utilities for augment-uploader integration tests

#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

use augment_uploader::{
    AugmentController, Capabilities, Config, HttpAugmentService, MemoryBlobStore,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Controller sending to `server`, with archives and previews in memory
pub struct Harness {
    pub controller: AugmentController,
    pub archives: MemoryBlobStore,
    pub previews: MemoryBlobStore,
}

/// Build a controller whose endpoint is `<server>/augment`
#[allow(dead_code)]
pub fn harness_for(server: &MockServer) -> Harness {
    let mut config = Config::default();
    config.service.endpoint = format!("{}/augment", server.uri()).parse().unwrap();
    config.service.timeout = Duration::from_secs(5);

    let archives = MemoryBlobStore::new();
    let previews = MemoryBlobStore::new();
    let capabilities = Capabilities {
        service: Arc::new(HttpAugmentService::new(&config.service).unwrap()),
        archives: Arc::new(archives.clone()),
        previews: Some(Arc::new(previews.clone())),
    };

    Harness {
        controller: AugmentController::with_capabilities(config, capabilities).unwrap(),
        archives,
        previews,
    }
}
