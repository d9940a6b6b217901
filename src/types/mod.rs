//! Core input types for the tracking pipeline.
//!
//! # Types
//!
//! - [`Rect`] - Axis-aligned bounding box with IoU and smoothing
//! - [`FrameGeometry`] - Frame dimensions in pixels
//! - [`DetectedObject`] - One detection from the external detection source
//! - [`Rgb`] - Averaged color sample
//! - [`Observation`] - Normalized, scale-invariant detection features

pub mod detection;
pub mod geometry;

pub use detection::{DetectedObject, FrameGeometry, Observation, Rgb};
pub use geometry::Rect;
