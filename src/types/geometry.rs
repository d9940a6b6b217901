//! Axis-aligned screen-space geometry.
//!
//! Bounding boxes arrive in screen pixels with the origin at the top-left
//! corner, so `top < bottom` for a non-degenerate box. All tracking logic is
//! built on two primitives defined here: Intersection-over-Union for spatial
//! overlap matching, and per-edge exponential blending for box smoothing.

use nalgebra::Point2;
use serde::Serialize;

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge (x of the left side).
    pub left: f32,
    /// Top edge (y of the top side, screen convention).
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Create a new rectangle from its four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Area of the rectangle.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Intersection-over-Union with another rectangle.
    ///
    /// Returns 0.0 when the rectangles do not overlap (intersection width or
    /// height is not strictly positive).
    pub fn iou(&self, other: &Rect) -> f32 {
        let x_a = self.left.max(other.left);
        let y_a = self.top.max(other.top);
        let x_b = self.right.min(other.right);
        let y_b = self.bottom.min(other.bottom);

        if x_b <= x_a || y_b <= y_a {
            return 0.0;
        }

        let intersection = (x_b - x_a) * (y_b - y_a);
        let union = self.area() + other.area() - intersection;
        intersection / union
    }

    /// Blend each edge toward `target` by `alpha` (1.0 jumps fully to the
    /// target, 0.0 stays put).
    pub fn blend_toward(&self, target: &Rect, alpha: f32) -> Rect {
        Rect {
            left: self.left + (target.left - self.left) * alpha,
            top: self.top + (target.top - self.top) * alpha,
            right: self.right + (target.right - self.right) * alpha,
            bottom: self.bottom + (target.bottom - self.bottom) * alpha,
        }
    }
}
