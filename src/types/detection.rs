//! Detection inputs and normalized observation features.
//!
//! The detection source (neural-network inference, depth sampling, color
//! averaging) lives outside this crate and hands over one fully-formed
//! [`DetectedObject`] list per frame. Before any signature work, a detection
//! is normalized against the frame dimensions into an [`Observation`]:
//! scale-invariant features that stay comparable across zoom levels and
//! screen resolutions.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Frame dimensions, in the same pixel units as detection bounding boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameGeometry {
    /// Frame width in pixels.
    pub width: f32,
    /// Frame height in pixels.
    pub height: f32,
}

impl FrameGeometry {
    /// Create a new frame geometry.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Total frame area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// An averaged RGB color sample, channels in [0, 255].
///
/// A sample only exists when all three channels were measured, so "has
/// color" is carried by `Option<Rgb>` rather than per-channel nullability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Create a new color sample.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Mean absolute per-channel difference to another sample.
    pub fn mean_abs_diff(&self, other: &Rgb) -> f32 {
        ((self.r - other.r).abs() + (self.g - other.g).abs() + (self.b - other.b).abs()) / 3.0
    }
}

/// A single detected object as delivered by the detection source.
///
/// Immutable per frame. The bounding box is in screen pixels; distance is in
/// meters when a depth sensor produced one.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    /// Bounding box in screen pixels.
    pub bounding_box: Rect,
    /// Detection confidence in [0, 1].
    pub confidence: f32,
    /// Class label reported by the detector.
    pub label: String,
    /// Real-world distance in meters, when depth data was available.
    pub real_distance: Option<f32>,
    /// Average color over the box, when color sampling ran.
    pub avg_color: Option<Rgb>,
}

impl DetectedObject {
    /// Create a detection with no depth or color data.
    pub fn new(bounding_box: Rect, confidence: f32, label: impl Into<String>) -> Self {
        Self {
            bounding_box,
            confidence,
            label: label.into(),
            real_distance: None,
            avg_color: None,
        }
    }

    /// Attach a real-world distance in meters.
    pub fn with_real_distance(mut self, meters: f32) -> Self {
        self.real_distance = Some(meters);
        self
    }

    /// Attach an averaged color sample.
    pub fn with_avg_color(mut self, color: Rgb) -> Self {
        self.avg_color = Some(color);
        self
    }
}

/// Normalized, scale-invariant features of one detection.
///
/// This is the unit of comparison for signatures: aspect ratio is
/// dimensionless, size is the fraction of the frame covered, and the center
/// lives in [0, 1]² normalized screen space. Optional depth and color data
/// are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Box width divided by box height.
    pub aspect_ratio: f32,
    /// Box area divided by frame area, in [0, 1].
    pub size: f32,
    /// Box center in normalized screen coordinates.
    pub center: Point2<f32>,
    /// Real-world distance in meters, if measured.
    pub real_distance: Option<f32>,
    /// Averaged color sample, if measured.
    pub color: Option<Rgb>,
}

impl Observation {
    /// Derive the normalized features of a detection within a frame.
    ///
    /// Degenerate inputs (zero-height box, zero-area frame) propagate as
    /// non-finite features rather than erroring; callers are expected to
    /// guarantee non-degenerate geometry upstream.
    pub fn from_detection(detection: &DetectedObject, frame: &FrameGeometry) -> Self {
        let rect = &detection.bounding_box;
        let center = rect.center();
        Self {
            aspect_ratio: rect.width() / rect.height(),
            size: rect.area() / frame.area(),
            center: Point2::new(center.x / frame.width, center.y / frame.height),
            real_distance: detection.real_distance,
            color: detection.avg_color,
        }
    }
}
