//! The per-frame matching pipeline.
//!
//! [`TrackingPipeline`] owns all mutable tracking state (memory store,
//! active tracker set, id counters) and exposes a single synchronous entry
//! point per video frame. Each call runs three stages to completion:
//!
//! 1. **Overlap matching** - existing trackers claim the unclaimed detection
//!    with the highest IoU against their raw box, above the IoU threshold.
//! 2. **Memory matching / registration** - leftover detections are matched
//!    against long-term memory by signature similarity, or register a new
//!    memory; either way a fresh tracker is spawned.
//! 3. **Eviction** - trackers unmatched past the timeout are dropped.
//!
//! The stages mutate shared state in sequence (stage 2 must see which
//! memories stage 1 already bound), so the pipeline requires exclusive
//! access for the duration of a call - which `&mut self` encodes.

use std::fmt::Write as _;
use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::errors::TrackerError;
use crate::memory::{MemoryId, MemoryStore, Registry};
use crate::output::{FrameOutput, TrackedInstance};
use crate::tracker::{ActiveTracker, TrackerId};
use crate::types::{DetectedObject, FrameGeometry, Observation};

use super::config::PipelineConfig;

/// Short-term IoU tracking combined with long-term signature memory.
///
/// All state is owned and explicit; there are no ambient globals. Dropping
/// the pipeline forgets everything, [`reset`](Self::reset) forgets
/// everything but keeps the registry.
#[derive(Debug)]
pub struct TrackingPipeline {
    config: PipelineConfig,
    memory: MemoryStore,
    trackers: Vec<ActiveTracker>,
    next_tracker_id: u32,
}

impl TrackingPipeline {
    /// Create a pipeline with the default configuration.
    pub fn new(registry: Registry) -> Self {
        Self {
            config: PipelineConfig::default(),
            memory: MemoryStore::new(registry),
            trackers: Vec::new(),
            next_tracker_id: 1,
        }
    }

    /// Create a pipeline with a custom configuration.
    ///
    /// # Errors
    /// Returns [`TrackerError::Configuration`] when a threshold is out of
    /// range.
    pub fn with_config(registry: Registry, config: PipelineConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(registry)
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The long-term memory store.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Currently active trackers, in creation order.
    pub fn active_trackers(&self) -> &[ActiveTracker] {
        &self.trackers
    }

    /// Number of memories ever registered.
    pub fn registered_count(&self) -> usize {
        self.memory.len()
    }

    /// Number of currently active trackers.
    pub fn active_count(&self) -> usize {
        self.trackers.len()
    }

    /// Process one frame of detections using the wall clock.
    pub fn process_frame_now(
        &mut self,
        detections: &[DetectedObject],
        frame: FrameGeometry,
    ) -> FrameOutput {
        self.process_frame(detections, frame, Instant::now())
    }

    /// Process one frame of detections at an explicit timestamp.
    ///
    /// `now` drives tracker recency and the eviction policy; injecting it
    /// keeps staleness behavior deterministic under test. Calls must be
    /// supplied in non-decreasing time order.
    pub fn process_frame(
        &mut self,
        detections: &[DetectedObject],
        frame: FrameGeometry,
        now: Instant,
    ) -> FrameOutput {
        let mut claimed_detections: SmallVec<[usize; 8]> = SmallVec::new();
        let mut matched_trackers: SmallVec<[TrackerId; 8]> = SmallVec::new();

        // Stage 1: continue existing trackers by raw-box overlap. Each
        // tracker greedily claims the unclaimed detection with the highest
        // IoU strictly above the threshold; the first maximal detection in
        // scan order wins ties.
        for tracker in self.trackers.iter_mut() {
            let mut best_iou = self.config.min_iou;
            let mut best_idx: Option<usize> = None;

            for (idx, detection) in detections.iter().enumerate() {
                if claimed_detections.contains(&idx) {
                    continue;
                }
                let iou = tracker.bounding_box.iou(&detection.bounding_box);
                if iou > best_iou {
                    best_iou = iou;
                    best_idx = Some(idx);
                }
            }

            if let Some(idx) = best_idx {
                let detection = &detections[idx];
                tracker.update_position(
                    detection.bounding_box,
                    detection.confidence,
                    detection.real_distance,
                    now,
                );

                let obs = Observation::from_detection(detection, &frame);
                self.memory.record_sighting(tracker.memory_id, &obs, now);

                matched_trackers.push(tracker.id);
                claimed_detections.push(idx);
                debug!(tracker_id = %tracker.id, iou = best_iou, "tracker continued");
            }
        }

        // Stage 2: leftover detections consult long-term memory. Memories
        // already bound to any live tracker (matched this frame or not) are
        // excluded so one memory never backs two trackers.
        let mut used_memory_ids: SmallVec<[MemoryId; 8]> =
            self.trackers.iter().map(|t| t.memory_id).collect();

        for (idx, detection) in detections.iter().enumerate() {
            if claimed_detections.contains(&idx) {
                continue;
            }

            let obs = Observation::from_detection(detection, &frame);
            let memory_id = match self.memory.find_best_match(
                &obs,
                &used_memory_ids,
                self.config.min_similarity,
            ) {
                Some(id) => {
                    self.memory.record_match(id, &obs, now);
                    id
                }
                None => self.memory.register(&obs, now),
            };
            used_memory_ids.push(memory_id);

            let tracker = ActiveTracker::new(
                TrackerId(self.next_tracker_id),
                memory_id,
                detection.bounding_box,
                detection.confidence,
                detection.real_distance,
                now,
            );
            self.next_tracker_id += 1;

            if let Some(entry) = self.memory.get(memory_id) {
                debug!(
                    tracker_id = %tracker.id,
                    name = %entry.registry_entry.name,
                    "tracker created"
                );
            }

            matched_trackers.push(tracker.id);
            self.trackers.push(tracker);
        }

        // Stage 3: evict trackers unmatched past the timeout. A brief
        // occlusion (under the timeout) keeps the tracker alive with its
        // old boxes.
        let timeout = self.config.tracker_timeout;
        self.trackers.retain(|tracker| {
            if matched_trackers.contains(&tracker.id) {
                return true;
            }
            let stale = now.duration_since(tracker.last_seen) > timeout;
            if stale {
                debug!(tracker_id = %tracker.id, "tracker evicted");
            }
            !stale
        });

        self.snapshot()
    }

    /// Forget all memories and trackers and restart both counters. Returns
    /// the (empty) output so consumers can clear their display state.
    pub fn reset(&mut self) -> FrameOutput {
        self.memory.clear();
        self.trackers.clear();
        self.next_tracker_id = 1;
        info!("tracking state reset");
        FrameOutput::empty()
    }

    /// Human-readable dump of the memory store and tracker set.
    pub fn debug_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "registered memories: {}", self.memory.len());

        for (i, entry) in self.memory.entries().iter().enumerate() {
            let sig = &entry.signature;
            let _ = writeln!(out, "{}: {} (x{})", i, entry.registry_entry.name, entry.match_count);
            let _ = writeln!(
                out,
                "   pos ({:.2}, {:.2})",
                sig.last_position.x, sig.last_position.y
            );
            let _ = writeln!(
                out,
                "   aspect [{:.2} ~ {:.2}]",
                sig.aspect_ratio.min, sig.aspect_ratio.max
            );
            let _ = writeln!(
                out,
                "   size [{:.1} ~ {:.1}]%",
                sig.size.min * 100.0,
                sig.size.max * 100.0
            );
            if let Some(range) = sig.real_distance {
                let _ = writeln!(out, "   distance [{:.1} ~ {:.1}]m", range.min, range.max);
            }
        }

        let _ = writeln!(out, "active trackers: {}", self.trackers.len());
        out
    }

    fn snapshot(&self) -> FrameOutput {
        let instances = self
            .trackers
            .iter()
            .filter_map(|tracker| {
                self.memory.get(tracker.memory_id).map(|entry| TrackedInstance {
                    tracker_id: tracker.id,
                    memory_id: tracker.memory_id,
                    registry_entry: entry.registry_entry.clone(),
                    bounding_box: tracker.smooth_box,
                    confidence: tracker.confidence,
                    real_distance: tracker.real_distance,
                    match_count: entry.match_count,
                })
            })
            .collect();
        FrameOutput::new(instances)
    }
}
