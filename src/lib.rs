/*!
# visual-reid-rs - Visual tracking and re-identification

Rust implementation of a real-time visual object tracking and
re-identification core: short-term IoU tracking across consecutive frames,
backed by a long-term memory of multi-feature signatures so objects that
leave and re-enter the field of view re-acquire their prior identity.

## Features

- Greedy IoU matching for frame-to-frame tracker continuity
- Multi-criterion signature similarity (shape, size, position, depth, color)
  with weight renormalization over available features
- Round-robin identity assignment from a caller-supplied registry
- Occlusion tolerance via a staleness timeout instead of immediate eviction
- Deterministic: explicit timestamps, no internal randomness beyond ids

## Modules

- [`pipeline`] - The per-frame matching pipeline and its configuration
- [`memory`] - Long-term memory store and the identity registry
- [`signature`] - Incremental fingerprints and similarity scoring
- [`tracker`] - Short-term active trackers
- [`types`] - Detection inputs, geometry, normalized observations
- [`output`] - Per-frame snapshots returned to the consumer

## Example

```rust
use std::time::Instant;
use visual_reid_rs::{
    DetectedObject, FrameGeometry, Rect, Registry, RegistryEntry, TrackingPipeline,
};

let registry = Registry::new(vec![
    RegistryEntry::new("hq", "Headquarters", "orange"),
    RegistryEntry::new("annex", "Annex", "blue"),
])
.expect("registry must be non-empty");

let mut pipeline = TrackingPipeline::new(registry);
let frame = FrameGeometry::new(1080.0, 1920.0);

// One call per video frame, detections from the external detector.
let detections = vec![
    DetectedObject::new(Rect::new(200.0, 400.0, 500.0, 900.0), 0.87, "building")
        .with_real_distance(42.0),
];
let output = pipeline.process_frame(&detections, frame, Instant::now());

for instance in &output.instances {
    println!(
        "{} {} at {:?}",
        instance.tracker_id, instance.registry_entry.name, instance.bounding_box
    );
}
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// Construction-time error types
pub mod errors;

/// Long-term memory store and identity registry
pub mod memory;

/// Per-frame output snapshots
pub mod output;

/// The matching pipeline and its configuration
pub mod pipeline;

/// Object signatures and similarity scoring
pub mod signature;

/// Short-term active trackers
pub mod tracker;

/// Detection inputs, geometry and normalized observations
pub mod types;

// ============================================================================
// Convenience re-exports
// ============================================================================

pub use errors::TrackerError;
pub use memory::{MemoryEntry, MemoryId, MemoryStore, Registry, RegistryEntry};
pub use output::{FrameOutput, TrackedInstance};
pub use pipeline::{PipelineConfig, TrackingPipeline};
pub use signature::{FeatureRange, ObjectSignature};
pub use tracker::{ActiveTracker, TrackerId};
pub use types::{DetectedObject, FrameGeometry, Observation, Rect, Rgb};
