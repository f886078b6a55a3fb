//! # augment-uploader
//!
//! Headless controller for assembling an ordered, labeled set of images and
//! submitting it to a remote augmentation service.
//!
//! ## Design Philosophy
//!
//! augment-uploader is designed to be:
//! - **Headless** - No rendering; hosts drive named operations and render from snapshots
//! - **Order-preserving** - Collection order is the pairing key between files and labels
//! - **Single-flight** - At most one request is ever in flight
//! - **Leak-free** - Archive handles and previews are released before replacement and on teardown
//!
//! ## Quick Start
//!
//! ```no_run
//! use augment_uploader::{AugmentController, Config, FileHandle, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.service.endpoint = "https://augment.example.com/augment".parse()?;
//!
//!     let controller = AugmentController::new(config)?;
//!
//!     controller
//!         .append(vec![
//!             FileHandle::from_path("cat.jpg").await?,
//!             FileHandle::from_path("dog.jpg").await?,
//!         ])
//!         .await?;
//!     controller.set_class_name(0, "cat").await?;
//!     controller.set_class_name(1, "dog").await?;
//!     controller.set_num_images(5).await?;
//!
//!     // Drag the dog in front of the cat
//!     let payload = controller.drag_start(1).await?;
//!     controller.drop_on(&payload, 0).await?;
//!
//!     match controller.submit().await? {
//!         SubmitOutcome::Completed(archive) => println!("download: {}", archive.url),
//!         other => println!("not submitted: {:?}", other),
//!     }
//!
//!     controller.teardown().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Platform capabilities (files, previews, archive handles)
pub mod capabilities;
/// Ordered entry collection
pub mod collection;
/// Configuration types
pub mod config;
/// Session controller (decomposed into focused submodules)
pub mod controller;
/// Drag gesture to reorder translation
pub mod drag;
/// Error types
pub mod error;
/// Outbound request to the augmentation service
pub mod service;
/// Core types and events
pub mod types;
/// Pre-submission validation
pub mod validation;

// Re-export commonly used types
pub use capabilities::{
    BlobPublisher, DirectoryBlobPublisher, FileHandle, FileSource, MemoryBlobStore, MimeFilter,
    PathFileSource, PreviewPublisher,
};
pub use collection::{EntryCollection, FileEntry};
pub use config::Config;
pub use controller::{AugmentController, Capabilities};
pub use drag::{DragPayload, DragReorderMachine, DragState, DropEffect, DropOutcome};
pub use error::{Error, GENERIC_FAILURE_MESSAGE, Result, ValidationError};
pub use service::{AugmentService, HttpAugmentService, SubmissionPayload};
pub use types::{ArchiveHandle, EntrySnapshot, Event, NumImages, RequestState, SubmitOutcome};
pub use validation::validate;
