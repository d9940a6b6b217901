//! Object signatures: incremental fingerprints and similarity scoring.
//!
//! A signature accumulates statistics about one real-world object over every
//! observation ever associated with it: the range of aspect ratios and sizes
//! seen, the last smoothed position, the range of measured distances, and an
//! averaged color. Matching a fresh observation against stored signatures is
//! how an object that left the field of view re-acquires its old identity.
//!
//! Range features (aspect ratio, size, distance) only ever widen, so a
//! signature becomes more permissive as an object is seen from more angles
//! and distances. Scoring is a weighted sum over per-feature criteria,
//! renormalized over whichever criteria are applicable to the comparison
//! (distance and color only count when both sides have them).

use nalgebra::Point2;

use crate::types::{Observation, Rgb};

/// Smoothing factor for the running aspect-ratio average (weight of the new
/// sample).
const ASPECT_AVG_ALPHA: f32 = 0.1;
/// Smoothing factor for the last-known position.
const POSITION_ALPHA: f32 = 0.3;
/// Smoothing factor for the color average once initialized.
const COLOR_ALPHA: f32 = 0.2;

/// Criterion weights. Distance and color are conditional; the final score is
/// divided by the sum of whichever weights applied.
const SHAPE_WEIGHT: f32 = 0.25;
const SIZE_WEIGHT: f32 = 0.20;
const POSITION_WEIGHT: f32 = 0.25;
const DISTANCE_WEIGHT: f32 = 0.20;
const COLOR_WEIGHT: f32 = 0.10;

/// Weight factor granted when a sample falls outside a range criterion.
/// Deliberately non-zero: no single range check can veto a match on its own.
const OUT_OF_RANGE_FACTOR: f32 = 0.3;

/// A monotonically widening `[min, max]` interval over one scalar feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    /// Smallest sample ever observed.
    pub min: f32,
    /// Largest sample ever observed.
    pub max: f32,
}

impl FeatureRange {
    /// Create a degenerate range containing a single sample.
    pub fn from_sample(sample: f32) -> Self {
        Self {
            min: sample,
            max: sample,
        }
    }

    /// Widen the range to include `sample`. Bounds never shrink.
    pub fn expand(&mut self, sample: f32) {
        if sample < self.min {
            self.min = sample;
        }
        if sample > self.max {
            self.max = sample;
        }
    }

    /// Width of the range.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }

    /// Whether `sample` falls inside the range widened by `margin` on both
    /// sides.
    #[inline]
    pub fn contains_with_margin(&self, sample: f32, margin: f32) -> bool {
        sample >= self.min - margin && sample <= self.max + margin
    }
}

/// Statistical fingerprint of one real-world object.
///
/// Owned exclusively by a single memory entry; updated in place on every
/// associated observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSignature {
    /// Observed aspect-ratio range.
    pub aspect_ratio: FeatureRange,
    /// Exponentially smoothed aspect ratio. Smoothed independently of the
    /// range bounds and never clamped into them, so it may legally drift
    /// outside `[min, max]` after asymmetric updates. Not consulted by
    /// [`similarity`](Self::similarity).
    pub avg_aspect_ratio: f32,
    /// Observed size range (fraction of frame area).
    pub size: FeatureRange,
    /// Smoothed last-known center in normalized screen coordinates.
    pub last_position: Point2<f32>,
    /// Observed real-distance range in meters; absent until the first
    /// depth-capable observation.
    pub real_distance: Option<FeatureRange>,
    /// Running color average; absent until the first fully-colored
    /// observation, which initializes it directly.
    pub color: Option<Rgb>,
}

impl ObjectSignature {
    /// Build a fresh signature from a first observation. Every range starts
    /// degenerate at the sample value.
    pub fn from_observation(obs: &Observation) -> Self {
        Self {
            aspect_ratio: FeatureRange::from_sample(obs.aspect_ratio),
            avg_aspect_ratio: obs.aspect_ratio,
            size: FeatureRange::from_sample(obs.size),
            last_position: obs.center,
            real_distance: obs.real_distance.map(FeatureRange::from_sample),
            color: obs.color,
        }
    }

    /// Fold a new observation into the signature.
    pub fn update(&mut self, obs: &Observation) {
        self.aspect_ratio.expand(obs.aspect_ratio);
        self.avg_aspect_ratio =
            self.avg_aspect_ratio * (1.0 - ASPECT_AVG_ALPHA) + obs.aspect_ratio * ASPECT_AVG_ALPHA;

        self.size.expand(obs.size);

        self.last_position = Point2::new(
            self.last_position.x * (1.0 - POSITION_ALPHA) + obs.center.x * POSITION_ALPHA,
            self.last_position.y * (1.0 - POSITION_ALPHA) + obs.center.y * POSITION_ALPHA,
        );

        if let Some(distance) = obs.real_distance {
            match &mut self.real_distance {
                Some(range) => range.expand(distance),
                None => self.real_distance = Some(FeatureRange::from_sample(distance)),
            }
        }

        if let Some(sample) = obs.color {
            match &mut self.color {
                Some(avg) => {
                    avg.r = avg.r * (1.0 - COLOR_ALPHA) + sample.r * COLOR_ALPHA;
                    avg.g = avg.g * (1.0 - COLOR_ALPHA) + sample.g * COLOR_ALPHA;
                    avg.b = avg.b * (1.0 - COLOR_ALPHA) + sample.b * COLOR_ALPHA;
                }
                None => self.color = Some(sample),
            }
        }
    }

    /// Weighted multi-criterion similarity against an observation, in [0, 1].
    ///
    /// Shape, size and position always contribute. The distance criterion
    /// contributes only when both the signature and the observation carry a
    /// distance; likewise color. The score is renormalized by the applicable
    /// weight so a depth-and-colorless comparison is judged purely on
    /// shape + size + position.
    pub fn similarity(&self, obs: &Observation) -> f32 {
        let mut total_score = 0.0;
        let mut total_weight = 0.0;

        // Shape range check, with margin widening for objects seen from
        // varied angles.
        let shape_margin = self.aspect_ratio.width() * 0.3 + 0.15;
        total_score += if self
            .aspect_ratio
            .contains_with_margin(obs.aspect_ratio, shape_margin)
        {
            SHAPE_WEIGHT
        } else {
            SHAPE_WEIGHT * OUT_OF_RANGE_FACTOR
        };
        total_weight += SHAPE_WEIGHT;

        // Size range check.
        let size_margin = self.size.width() * 0.3 + 0.05;
        total_score += if self.size.contains_with_margin(obs.size, size_margin) {
            SIZE_WEIGHT
        } else {
            SIZE_WEIGHT * OUT_OF_RANGE_FACTOR
        };
        total_weight += SIZE_WEIGHT;

        // Position: continuous falloff with squared distance in normalized
        // screen space, zero past d² = 0.5.
        let dist_sq = (obs.center - self.last_position).norm_squared();
        let position_score = (1.0 - dist_sq * 2.0).clamp(0.0, 1.0);
        total_score += position_score * POSITION_WEIGHT;
        total_weight += POSITION_WEIGHT;

        // Real distance range check, only when both sides measured one.
        if let (Some(distance), Some(range)) = (obs.real_distance, self.real_distance) {
            let distance_margin = range.width() * 0.3 + 0.5;
            total_score += if range.contains_with_margin(distance, distance_margin) {
                DISTANCE_WEIGHT
            } else {
                DISTANCE_WEIGHT * OUT_OF_RANGE_FACTOR
            };
            total_weight += DISTANCE_WEIGHT;
        }

        // Color similarity, only when both sides carry a sample.
        if let (Some(sample), Some(avg)) = (obs.color, self.color) {
            let color_score = (1.0 - avg.mean_abs_diff(&sample) / 255.0).clamp(0.0, 1.0);
            total_score += color_score * COLOR_WEIGHT;
            total_weight += COLOR_WEIGHT;
        }

        if total_weight > 0.0 {
            total_score / total_weight
        } else {
            0.0
        }
    }
}
