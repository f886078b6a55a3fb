//! Core types for augment-uploader

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Number of augmented images the service generates per input image
///
/// Bounded to `[1, 100]` at construction, which is the edit site. Submission
/// does not re-check the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct NumImages(u32);

impl NumImages {
    /// Smallest accepted value
    pub const MIN: u32 = 1;
    /// Largest accepted value
    pub const MAX: u32 = 100;

    /// Create a new NumImages, rejecting values outside `[1, 100]`
    pub fn new(value: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidNumImages {
                value: value.to_string(),
            })
        }
    }

    /// Get the inner u32 value
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for NumImages {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u32> for NumImages {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NumImages> for u32 {
    fn from(value: NumImages) -> Self {
        value.0
    }
}

impl std::str::FromStr for NumImages {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().parse::<u32>().map_err(|_| Error::InvalidNumImages {
            value: s.to_string(),
        })?;
        Self::new(value).map_err(|_| Error::InvalidNumImages {
            value: s.to_string(),
        })
    }
}

impl std::fmt::Display for NumImages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Local, revocable reference to the bytes returned by the service
///
/// Created by a [`BlobPublisher`](crate::capabilities::BlobPublisher) and released
/// through the same publisher. At most one is live per controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveHandle {
    /// Locally addressable URL of the archive (`blob:` or `file://`)
    pub url: Url,
    /// Name the archive is offered under when downloaded
    pub file_name: String,
    /// Size of the archive in bytes
    pub size_bytes: u64,
    /// When the handle was created
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of the single outbound request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum RequestState {
    /// No request has been made, or a fresh ingestion cleared the previous outcome
    #[default]
    Idle,
    /// A request is awaiting its response
    InFlight,
    /// The service answered and the archive is available for download
    Succeeded(ArchiveHandle),
    /// Validation or the request failed; holds the user-facing message
    Failed(String),
}

impl RequestState {
    /// Whether a request is currently awaiting its response
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    /// The live archive handle, if the last submission succeeded
    pub fn archive(&self) -> Option<&ArchiveHandle> {
        match self {
            RequestState::Succeeded(handle) => Some(handle),
            _ => None,
        }
    }

    /// The user-facing error message, if the last submission failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Read-only view of one entry, for rendering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    /// Position in the collection
    pub index: usize,
    /// File name as ingested
    pub display_name: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Current class label, verbatim
    pub class_name: String,
    /// Temporary preview URL, when a preview publisher is configured
    pub preview: Option<Url>,
}

/// How a call to `submit` ended
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another request was in flight; nothing changed
    AlreadyInFlight,
    /// Validation failed; no request was made
    Rejected(Error),
    /// The service answered and the archive handle is live
    Completed(ArchiveHandle),
    /// The request failed; the state holds the generic message, this holds the cause
    Failed(Error),
    /// The controller was torn down while the request was in flight
    Abandoned,
}

impl SubmitOutcome {
    /// Whether the submission produced an archive
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed(_))
    }
}

/// Event emitted as the controller's state changes
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Files were appended to the collection
    EntriesAdded {
        /// Number of entries appended
        count: usize,
        /// Collection length afterwards
        total: usize,
    },

    /// An entry was removed
    EntryRemoved {
        /// Former position of the entry
        index: usize,
    },

    /// An entry's class name was edited
    ClassNameChanged {
        /// Position of the entry
        index: usize,
    },

    /// An entry was moved by a drag gesture or a direct call
    EntryMoved {
        /// Position before the move
        from: usize,
        /// Position in the shortened sequence it was inserted at
        to: usize,
    },

    /// The number of images to generate changed
    NumImagesChanged {
        /// New value
        value: u32,
    },

    /// A request was sent to the augmentation service
    SubmissionStarted {
        /// Number of entries submitted
        entries: usize,
    },

    /// The service answered and the archive is available
    SubmissionSucceeded {
        /// Size of the archive in bytes
        size_bytes: u64,
    },

    /// Validation or the request failed
    SubmissionFailed {
        /// User-facing message
        message: String,
    },

    /// A previous archive handle was released
    ArchiveReleased {
        /// URL of the released handle
        url: Url,
    },

    /// The controller was torn down
    TornDown,
}
