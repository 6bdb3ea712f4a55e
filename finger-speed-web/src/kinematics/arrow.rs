//! Arrow geometry - maps velocity/acceleration vectors to on-screen arrows
//!
//! Pure functions, no state. Displacements are in pixels, in the same
//! orientation as the canvas (y down).

use std::f32::consts::PI;
use super::sample::Vec2;

/// Representative time horizon for both arrow kinds (seconds)
pub const ARROW_WINDOW_SECS: f32 = 0.08;

/// Shorter arrows are jitter, not motion
pub const MIN_ARROW_PX: f32 = 6.0;

/// Longer arrows are rescaled down to this length
pub const MAX_ARROW_PX: f32 = 160.0;

/// Arrowhead segment angle relative to the shaft direction
pub const ARROW_HEAD_ANGLE: f32 = PI * 0.85;

/// Arrowhead segment length
pub const ARROW_HEAD_PX: f32 = 12.0;

/// What the vector represents, which decides how it is scaled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowKind {
    /// px/s, displacement `v*T`
    Velocity,
    /// px/s², displacement `0.5*a*T²`
    Acceleration,
}

/// Arrow displacement for a vector, or `None` when too short to draw
pub fn arrow_displacement(vector: Vec2, kind: ArrowKind) -> Option<Vec2> {
    let t = ARROW_WINDOW_SECS;
    let raw = match kind {
        ArrowKind::Velocity => vector * t,
        ArrowKind::Acceleration => vector * (0.5 * t * t),
    };
    clamp_displacement(raw)
}

/// Suppress below [`MIN_ARROW_PX`], rescale above [`MAX_ARROW_PX`] keeping direction
pub fn clamp_displacement(displacement: Vec2) -> Option<Vec2> {
    let length = displacement.norm();
    if !length.is_finite() || length < MIN_ARROW_PX {
        return None;
    }
    if length > MAX_ARROW_PX {
        Some(displacement * (MAX_ARROW_PX / length))
    } else {
        Some(displacement)
    }
}

/// Shaft plus two arrowhead segments, in the caller's pixel space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowGeometry {
    pub tail: Vec2,
    pub tip: Vec2,
    pub head: [Vec2; 2],
}

impl ArrowGeometry {
    pub fn new(origin: Vec2, displacement: Vec2) -> Self {
        let tip = origin + displacement;
        let angle = displacement.y.atan2(displacement.x);
        let head_end = |offset: f32| {
            let a = angle + offset;
            tip + Vec2::new(a.cos(), a.sin()) * ARROW_HEAD_PX
        };
        Self {
            tail: origin,
            tip,
            head: [head_end(ARROW_HEAD_ANGLE), head_end(-ARROW_HEAD_ANGLE)],
        }
    }

    /// Line segments to draw: shaft, then both head strokes
    pub fn segments(&self) -> [(Vec2, Vec2); 3] {
        [
            (self.tail, self.tip),
            (self.tip, self.head[0]),
            (self.tip, self.head[1]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_scaling() {
        let d = arrow_displacement(Vec2::new(1000.0, 0.0), ArrowKind::Velocity).unwrap();
        assert!((d.x - 80.0).abs() < 1e-3);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn test_acceleration_scaling() {
        // 0.5 * 10000 * 0.0064 = 32 px
        let d = arrow_displacement(Vec2::new(0.0, 10000.0), ArrowKind::Acceleration).unwrap();
        assert!((d.y - 32.0).abs() < 1e-2);
    }

    #[test]
    fn test_short_arrow_is_absent() {
        // 50 px/s * 0.08 = 4 px
        assert_eq!(arrow_displacement(Vec2::new(50.0, 0.0), ArrowKind::Velocity), None);
        assert_eq!(arrow_displacement(Vec2::zeros(), ArrowKind::Acceleration), None);
    }

    #[test]
    fn test_long_arrow_is_clamped_keeping_direction() {
        let v = Vec2::new(3000.0, -4000.0);
        let unclamped = v * ARROW_WINDOW_SECS;
        let d = arrow_displacement(v, ArrowKind::Velocity).unwrap();

        assert!((d.norm() - MAX_ARROW_PX).abs() < 1e-3);
        let before = unclamped.y.atan2(unclamped.x);
        let after = d.y.atan2(d.x);
        assert!((before - after).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(clamp_displacement(Vec2::new(f32::NAN, 0.0)), None);
    }

    #[test]
    fn test_idempotent() {
        let v = Vec2::new(812.5, 133.0);
        let a = arrow_displacement(v, ArrowKind::Velocity);
        let b = arrow_displacement(v, ArrowKind::Velocity);
        assert_eq!(a, b);
        let origin = Vec2::new(320.0, 240.0);
        let d = a.unwrap();
        assert_eq!(ArrowGeometry::new(origin, d), ArrowGeometry::new(origin, d));
    }

    #[test]
    fn test_head_points_back_along_shaft() {
        let arrow = ArrowGeometry::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        assert_eq!(arrow.tip, Vec2::new(100.0, 0.0));
        for end in arrow.head {
            assert!(((end - arrow.tip).norm() - ARROW_HEAD_PX).abs() < 1e-3);
            // Behind the tip, on opposite sides of the shaft
            assert!(end.x < arrow.tip.x);
        }
        assert!(arrow.head[0].y * arrow.head[1].y < 0.0);
    }
}
