//! Image fixtures and response bodies

use augment_uploader::FileHandle;

/// Smallest well-formed PNG header, enough for content-type sniffing on the service side
pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n";

/// JPEG start-of-image marker
pub const JPEG_HEADER: &[u8] = b"\xff\xd8\xff\xe0";

/// Body returned by the mock service on success
pub const ZIP_BODY: &[u8] = b"PK\x03\x04augmented-images";

/// In-memory JPEG named `name`
pub fn jpeg(name: &str) -> FileHandle {
    let mut bytes = JPEG_HEADER.to_vec();
    bytes.extend_from_slice(name.as_bytes());
    FileHandle::from_bytes(name, "image/jpeg", bytes)
}

/// In-memory PNG named `name`
pub fn png(name: &str) -> FileHandle {
    let mut bytes = PNG_HEADER.to_vec();
    bytes.extend_from_slice(name.as_bytes());
    FileHandle::from_bytes(name, "image/png", bytes)
}
