//! Scenario-building helpers shared across integration tests.
//!
//! Tests describe detections either directly in pixels or through the
//! normalized features the signature layer works in (aspect ratio, frame
//! fraction, normalized center); `detection_from_features` converts the
//! latter back into a pixel box against the test frame.

#![allow(dead_code)]

use visual_reid_rs::{DetectedObject, FrameGeometry, Rect, Registry, RegistryEntry};

/// Standard square test frame; convenient because x and y normalize alike.
pub const FRAME: FrameGeometry = FrameGeometry {
    width: 1000.0,
    height: 1000.0,
};

/// A small landmark registry in round-robin order.
pub fn test_registry() -> Registry {
    Registry::new(vec![
        RegistryEntry::new("alpha", "Alpha Tower", "orange"),
        RegistryEntry::new("beta", "Beta Plaza", "blue"),
        RegistryEntry::new("gamma", "Gamma Center", "purple"),
    ])
    .expect("non-empty registry")
}

/// Detection from a pixel-space box with a fixed confidence.
pub fn detection(left: f32, top: f32, right: f32, bottom: f32) -> DetectedObject {
    DetectedObject::new(Rect::new(left, top, right, bottom), 0.9, "building")
}

/// Detection whose normalized features against [`FRAME`] come out exactly as
/// requested: center `(cx, cy)` in [0, 1]², aspect ratio `w/h`, and size as a
/// fraction of the frame area.
pub fn detection_from_features(cx: f32, cy: f32, aspect_ratio: f32, size: f32) -> DetectedObject {
    let height = (size * FRAME.area() / aspect_ratio).sqrt();
    let width = aspect_ratio * height;
    let center_x = cx * FRAME.width;
    let center_y = cy * FRAME.height;

    detection(
        center_x - width / 2.0,
        center_y - height / 2.0,
        center_x + width / 2.0,
        center_y + height / 2.0,
    )
}
