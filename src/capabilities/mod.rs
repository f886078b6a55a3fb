//! Injected platform capabilities
//!
//! The controller never touches a file picker, a drag-and-drop surface or a
//! temporary-URL facility directly. Each of those is reached through a trait so
//! hosts can plug in their platform and tests can plug in fakes.
//!
//! ## Architecture
//!
//! - [`FileContent`] and [`FileHandle`]: an opaque file exposing only its name,
//!   size, MIME type and a content read
//! - [`FileSource`]: produces file handles (a picker or a drop zone)
//! - [`PreviewPublisher`]: turns a file handle into a displayable temporary URL
//! - [`BlobPublisher`]: turns response bytes into a revocable [`ArchiveHandle`](crate::types::ArchiveHandle)
//!
//! Implementations provided:
//!
//! - [`MemoryBlobStore`]: `blob:` URLs backed by an in-process map (previews and archives)
//! - [`DirectoryBlobPublisher`]: archives written under a directory, addressed by `file://` URLs
//! - [`FileUrlPreviewPublisher`]: `file://` previews for path-backed handles
//! - [`PathFileSource`]: a fixed list of paths filtered through a [`MimeFilter`]
//!
//! ## Usage
//!
//! ```no_run
//! use augment_uploader::capabilities::{FileSource, MimeFilter, PathFileSource};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = PathFileSource::new(
//!         vec![PathBuf::from("cat.jpg"), PathBuf::from("notes.txt")],
//!         MimeFilter::default(),
//!     );
//!
//!     // notes.txt is filtered out at the ingestion boundary
//!     let files = source.select().await?;
//!     for file in &files {
//!         println!("{} ({} bytes)", file.name(), file.size_bytes());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod file;
mod fs;
mod memory;
mod mime;
mod traits;

pub use file::{FileContent, FileHandle, MemoryContent, PathContent};
pub use fs::{DirectoryBlobPublisher, FileUrlPreviewPublisher, PathFileSource};
pub use memory::MemoryBlobStore;
pub use mime::{MimeFilter, guess_mime_type};
pub use traits::{BlobPublisher, FileSource, PreviewPublisher};
