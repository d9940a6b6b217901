//! Pipeline tuning parameters.

use std::time::Duration;

use serde::Serialize;

use crate::errors::TrackerError;

/// Tuning knobs for the per-frame matching pipeline.
///
/// The defaults reproduce the reference behavior and are a sane starting
/// point for street-scale objects seen from a phone camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Minimum IoU for stage-1 overlap matching. A detection must overlap a
    /// tracker's raw box strictly more than this to continue it.
    pub min_iou: f32,
    /// Minimum signature similarity for stage-2 memory matching. Scores at
    /// or below this register a new memory instead.
    pub min_similarity: f32,
    /// How long an unmatched tracker survives before eviction.
    pub tracker_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_iou: 0.2,
            min_similarity: 0.45,
            tracker_timeout: Duration::from_millis(500),
        }
    }
}

impl PipelineConfig {
    /// Check that thresholds are usable.
    ///
    /// # Errors
    /// Returns [`TrackerError::Configuration`] when a threshold lies outside
    /// its meaningful range.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(0.0..1.0).contains(&self.min_iou) {
            return Err(TrackerError::Configuration {
                description: format!("min_iou must lie in [0, 1), got {}", self.min_iou),
            });
        }
        if !(0.0..1.0).contains(&self.min_similarity) {
            return Err(TrackerError::Configuration {
                description: format!(
                    "min_similarity must lie in [0, 1), got {}",
                    self.min_similarity
                ),
            });
        }
        if self.tracker_timeout.is_zero() {
            return Err(TrackerError::Configuration {
                description: "tracker_timeout must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
