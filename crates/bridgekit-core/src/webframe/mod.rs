//! Recovery of frame/request information the rendering framework omits from
//! its callback payloads.
//!
//! The framework populates an originating frame on navigation-action objects
//! and a network request on frame-info objects, but its public accessors drop
//! them for some callback payloads. Without ad hoc object extension, the
//! recovery mechanism is a lookup table keyed by the framework object's
//! identity: the binding layer interposes on object receipt, records what the
//! framework knew at that point, and the two accessors read it back. The
//! table is the single narrow interface to this inherently layout-fragile
//! recovery.
//!
//! Accessors are pure reads: absent exactly when the framework itself had
//! nothing, otherwise exactly what was recorded. Entries are retired when the
//! navigation lifecycle ends.

use std::collections::HashMap;
use std::num::NonZeroU64;

use parking_lot::RwLock;

/// Identity of a navigation-action object, as assigned by the binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(NonZeroU64);

impl ActionId {
    #[must_use]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

/// Identity of a frame-info object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(NonZeroU64);

impl FrameId {
    #[must_use]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

/// Snapshot of the network request underlying a frame-info object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub url: String,
    pub method: String,
}

/// Identity-keyed recovery table for navigation-action and frame-info
/// objects.
#[derive(Debug, Default)]
pub struct FrameRegistry {
    actions: RwLock<HashMap<ActionId, Option<FrameId>>>,
    frames: RwLock<HashMap<FrameId, Option<RequestRecord>>>,
}

impl FrameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records what the framework knew about a navigation action at the
    /// point it was received. `source` is `None` when the framework itself
    /// has no originating frame (top-level navigation).
    pub fn record_action(&self, action: ActionId, source: Option<FrameId>) {
        self.actions.write().insert(action, source);
    }

    /// The originating frame of a navigation action. `None` exactly when
    /// nothing was recorded or the recorded field was unset.
    #[must_use]
    pub fn real_source_frame(&self, action: ActionId) -> Option<FrameId> {
        self.actions.read().get(&action).copied().flatten()
    }

    /// Records the request underlying a frame-info object.
    pub fn record_frame(&self, frame: FrameId, request: Option<RequestRecord>) {
        self.frames.write().insert(frame, request);
    }

    /// The request underlying a frame-info object. `None` exactly when
    /// nothing was recorded or the recorded field was unset.
    #[must_use]
    pub fn real_request(&self, frame: FrameId) -> Option<RequestRecord> {
        self.frames.read().get(&frame).cloned().flatten()
    }

    /// Drops a navigation action's entry once its lifecycle ends.
    pub fn retire_action(&self, action: ActionId) {
        self.actions.write().remove(&action);
    }

    /// Drops a frame-info entry once its lifecycle ends.
    pub fn retire_frame(&self, frame: FrameId) {
        self.frames.write().remove(&frame);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty() && self.frames.read().is_empty()
    }
}
