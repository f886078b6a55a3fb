//! Drag gesture to reorder translation
//!
//! The machine is transient presentation state layered over an
//! [`EntryCollection`]. Correctness only depends on the [`DragPayload`] carried
//! by the gesture; the active index exists for highlighting.

use serde::{Deserialize, Serialize};

use crate::collection::EntryCollection;
use crate::error::Result;

/// Gesture payload captured at drag start and read back at drop
///
/// Mirrors a platform data-transfer slot: the source index travels as text,
/// so a drop dispatched elsewhere can still recover it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragPayload(String);

impl DragPayload {
    /// Payload carrying `index`
    pub fn for_index(index: usize) -> Self {
        Self(index.to_string())
    }

    /// Payload from raw platform data
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw text as placed on the platform data-transfer slot
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Source index, if the payload holds one
    pub fn source_index(&self) -> Option<usize> {
        self.0.trim().parse().ok()
    }
}

/// What the host must tell the platform during drag-over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropEffect {
    /// Suppress the default reject-drop behavior so the drop event fires
    Move,
}

/// State of the drag gesture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    /// An entry is being dragged
    Dragging {
        /// Index the gesture started on
        source: usize,
    },
}

/// Result of a drop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The entry moved from `from` to `to`
    Moved {
        /// Index before the move
        from: usize,
        /// Index in the shortened sequence it was inserted at
        to: usize,
    },
    /// Dropped onto its own slot
    Unchanged,
    /// The payload carried no usable index
    Ignored,
}

/// Two-state machine turning drag start/over/drop into a collection move
#[derive(Clone, Debug, Default)]
pub struct DragReorderMachine {
    state: DragState,
}

impl DragReorderMachine {
    /// Create an idle machine
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Index being dragged, for highlighting only
    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging { source } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Start dragging the entry at `index`
    ///
    /// Returns the payload the host must attach to the platform gesture.
    pub fn on_drag_start(&mut self, index: usize) -> DragPayload {
        self.state = DragState::Dragging { source: index };
        DragPayload::for_index(index)
    }

    /// Drag passes over `index`; never changes state
    pub fn on_drag_over(&self, _index: usize) -> DropEffect {
        DropEffect::Move
    }

    /// Drop onto `target`, moving the entry named by `payload`
    ///
    /// The machine returns to idle whatever the outcome. An out-of-range
    /// index leaves the collection unchanged and is returned as an error.
    pub fn on_drop(
        &mut self,
        payload: &DragPayload,
        target: usize,
        collection: &mut EntryCollection,
    ) -> Result<DropOutcome> {
        self.state = DragState::Idle;

        let Some(source) = payload.source_index() else {
            tracing::debug!(payload = payload.as_str(), "drop payload carries no index");
            return Ok(DropOutcome::Ignored);
        };

        if source == target {
            return Ok(DropOutcome::Unchanged);
        }

        collection.move_entry(source, target)?;
        Ok(DropOutcome::Moved {
            from: source,
            to: target,
        })
    }

    /// Gesture ended without a drop
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
