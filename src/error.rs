//! Error types for augment-uploader
//!
//! This module provides the error handling for the library, including:
//! - Validation errors reported before any network call, with user-facing messages
//! - Transport errors from the single outbound request, coarsened for the user
//! - Machine-readable error codes for host applications

use thiserror::Error;

/// Result type alias for augment-uploader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to the user for any failure of the outbound request.
///
/// The specific cause is only logged and returned to the caller for diagnostics.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error processing images. Please try again.";

/// Pre-submission validation failures
///
/// The `Display` output of each variant is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The collection holds no entries
    #[error("Please select at least one image file")]
    EmptySelection,

    /// An entry's class name is empty after trimming whitespace
    #[error("Please provide a class name for each image")]
    MissingClassName {
        /// Position of the first entry without a class name
        index: usize,
    },
}

/// Main error type for augment-uploader
#[derive(Debug, Error)]
pub enum Error {
    /// The collection failed pre-submission validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An index did not address an entry in the collection
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// The index that was requested
        index: usize,
        /// Length of the collection at the time of the call
        len: usize,
    },

    /// The number of images to generate is outside `[1, 100]` or not a number
    #[error("number of images must be between 1 and 100, got {value:?}")]
    InvalidNumImages {
        /// The rejected input as typed
        value: String,
    },

    /// The outbound request could not be completed
    #[error("transport failure: {0}")]
    Transport(String),

    /// The augmentation service answered with a non-success status
    #[error("augmentation service returned status {status}: {body}")]
    ServiceStatus {
        /// HTTP status code
        status: u16,
        /// Response body, truncated for logging
        body: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "download.file_name")
        key: Option<String>,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation not supported by the injected capability
    #[error("not supported: {0}")]
    NotSupported(String),

    /// The controller has been torn down and accepts no further operations
    #[error("controller has been torn down")]
    TornDown,

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(ValidationError::EmptySelection) => "empty_selection",
            Error::Validation(ValidationError::MissingClassName { .. }) => "missing_class_name",
            Error::IndexOutOfRange { .. } => "index_out_of_range",
            Error::InvalidNumImages { .. } => "invalid_num_images",
            Error::Transport(_) => "transport_failure",
            Error::ServiceStatus { .. } => "service_status",
            Error::Network(_) => "network_error",
            Error::Io(_) => "io_error",
            Error::Config { .. } => "config_error",
            Error::Serialization(_) => "serialization_error",
            Error::NotSupported(_) => "not_supported",
            Error::TornDown => "torn_down",
            Error::Other(_) => "internal_error",
        }
    }

    /// Message suitable for showing to the end user
    ///
    /// Validation and edit-site errors are specific. Everything that happens
    /// around the outbound request collapses to [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::InvalidNumImages { .. } => {
                "Number of images must be between 1 and 100".to_string()
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Whether this error belongs to the transport class (network, HTTP status, content read)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::ServiceStatus { .. } | Error::Network(_) | Error::Io(_)
        )
    }
}
