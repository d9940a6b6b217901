//! Per-frame output snapshots.
//!
//! After processing a frame the pipeline returns the current set of tracked
//! instances as a plain value. Consumption (label rendering, UI) is entirely
//! out of scope; snapshots are `Serialize` so a sink layer can ship them
//! wherever it likes.

use serde::Serialize;

use crate::memory::{MemoryId, RegistryEntry};
use crate::tracker::TrackerId;
use crate::types::Rect;

/// One currently tracked instance, as exposed to the consumer.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedInstance {
    /// Short-term tracker identity.
    pub tracker_id: TrackerId,
    /// Long-term memory identity.
    pub memory_id: MemoryId,
    /// Registry entry bound to the memory at registration time.
    pub registry_entry: RegistryEntry,
    /// Smoothed bounding box, suited for display.
    pub bounding_box: Rect,
    /// Latest detection confidence.
    pub confidence: f32,
    /// Latest real-world distance in meters, if measured.
    pub real_distance: Option<f32>,
    /// How many times the underlying memory has been associated.
    pub match_count: u32,
}

/// All tracked instances after one processed frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    /// Active instances, in tracker creation order.
    pub instances: Vec<TrackedInstance>,
}

impl FrameOutput {
    /// Create an output from a list of instances.
    pub fn new(instances: Vec<TrackedInstance>) -> Self {
        Self { instances }
    }

    /// Create an empty output (no active trackers).
    pub fn empty() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Number of active instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no instances are active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
