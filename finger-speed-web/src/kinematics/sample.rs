//! Sample types - one observation of the tracked point per frame

use nalgebra::{Vector2, Vector3};

/// 2D vector (pixel-space velocity, acceleration, arrow displacement)
pub type Vec2 = Vector2<f32>;
/// 3D position in normalized, pixel or world space
pub type Vec3 = Vector3<f32>;

/// A timestamped position of the tracked point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Monotonic time in seconds
    pub timestamp: f64,
    pub position: Vec3,
}

impl Sample {
    pub fn new(timestamp: f64, position: Vec3) -> Self {
        Self { timestamp, position }
    }

    /// Seconds elapsed since `earlier`, or `None` when the delta is not strictly positive.
    ///
    /// Checked after narrowing to f32 so a sub-epsilon f64 delta never becomes a zero divisor.
    pub fn dt_since(&self, earlier: &Sample) -> Option<f32> {
        elapsed(earlier.timestamp, self.timestamp)
    }
}

/// Positive time delta in seconds between two timestamps
pub(crate) fn elapsed(earlier: f64, now: f64) -> Option<f32> {
    let dt = (now - earlier) as f32;
    if dt > 0.0 { Some(dt) } else { None }
}

/// Rendering surface size in device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Diagonal length in pixels, converts normalized distance to pixel distance
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }

    /// Normalized (0-1) x/y to pixels
    pub fn to_pixels(&self, normalized: Vec3) -> Vec2 {
        Vec2::new(normalized.x * self.width, normalized.y * self.height)
    }
}
