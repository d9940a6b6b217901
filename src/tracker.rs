//! Short-term active trackers.
//!
//! An active tracker is the per-frame-continuous binding between a memory
//! entry and the box currently on screen. It holds both the raw box from the
//! latest detection (used for IoU matching) and an exponentially smoothed
//! box (used for display), and is evicted once it goes unmatched past the
//! configured timeout.

use std::time::Instant;

use nalgebra::Point2;
use serde::Serialize;

use crate::memory::MemoryId;
use crate::types::Rect;

/// Per-edge blend factor applied when a tracker picks up a new box.
/// High enough to follow motion quickly, low enough to damp detector jitter.
const BOX_SMOOTHING: f32 = 0.7;

/// Identity of one short-term tracker. Monotonically increasing from 1,
/// reused only after a pipeline reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TrackerId(pub u32);

impl std::fmt::Display for TrackerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One currently visible tracked instance.
#[derive(Debug, Clone)]
pub struct ActiveTracker {
    /// Tracker identity.
    pub id: TrackerId,
    /// Owning memory entry (non-owning back-reference).
    pub memory_id: MemoryId,
    /// Raw bounding box from the latest matched detection.
    pub bounding_box: Rect,
    /// Exponentially smoothed bounding box.
    pub smooth_box: Rect,
    /// Confidence of the latest matched detection.
    pub confidence: f32,
    /// Real-world distance of the latest matched detection, if measured.
    pub real_distance: Option<f32>,
    /// When this tracker last matched a detection.
    pub last_seen: Instant,
}

impl ActiveTracker {
    /// Create a tracker from its first detection. The smoothed box starts
    /// equal to the raw box since there is no smoothing history yet.
    pub fn new(
        id: TrackerId,
        memory_id: MemoryId,
        bounding_box: Rect,
        confidence: f32,
        real_distance: Option<f32>,
        now: Instant,
    ) -> Self {
        Self {
            id,
            memory_id,
            bounding_box,
            smooth_box: bounding_box,
            confidence,
            real_distance,
            last_seen: now,
        }
    }

    /// Fold in a newly matched detection: the raw box is replaced, the
    /// smoothed box blends toward it, and confidence/distance/recency are
    /// taken from the new detection.
    pub fn update_position(
        &mut self,
        new_box: Rect,
        new_confidence: f32,
        new_real_distance: Option<f32>,
        now: Instant,
    ) {
        self.smooth_box = self.smooth_box.blend_toward(&new_box, BOX_SMOOTHING);
        self.bounding_box = new_box;
        self.confidence = new_confidence;
        self.real_distance = new_real_distance;
        self.last_seen = now;
    }

    /// Center of the smoothed box, for label placement by the display layer.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        self.smooth_box.center()
    }
}
