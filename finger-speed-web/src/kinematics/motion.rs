//! Two-stage smoothed differentiation in pixel space
//!
//! Position deltas feed a session-long velocity EMA; consecutive smoothed
//! velocities feed an acceleration EMA. Both anchors drop together on loss.

use super::sample::{elapsed, CanvasSize, Sample, Vec2};
use super::smoothing::ema;

/// Previous smoothed velocity, differentiated into acceleration
#[derive(Clone, Copy, Debug, PartialEq)]
struct VelocityAnchor {
    timestamp: f64,
    velocity: Vec2,
}

/// Smoothed 2D velocity (px/s) and acceleration (px/s²)
#[derive(Clone, Debug)]
pub struct MotionEstimator {
    velocity: Vec2,
    acceleration: Vec2,
    velocity_anchor: Option<VelocityAnchor>,
    velocity_alpha: f32,
    acceleration_alpha: f32,
}

impl MotionEstimator {
    pub fn new(velocity_alpha: f32, acceleration_alpha: f32) -> Self {
        Self {
            velocity: Vec2::zeros(),
            acceleration: Vec2::zeros(),
            velocity_anchor: None,
            velocity_alpha,
            acceleration_alpha,
        }
    }

    /// Differentiate `curr` against the previous position anchor `prev`.
    ///
    /// Returns `true` when the velocity was updated. Nothing changes when `dt <= 0`.
    pub fn update(&mut self, prev: &Sample, curr: &Sample, canvas: CanvasSize) -> bool {
        let dt = match curr.dt_since(prev) {
            Some(dt) => dt,
            None => return false,
        };

        let delta = curr.position - prev.position;
        let raw_velocity = Vec2::new(
            delta.x * canvas.width / dt,
            delta.y * canvas.height / dt,
        );
        self.velocity = ema(self.velocity, raw_velocity, self.velocity_alpha);

        if let Some(anchor) = self.velocity_anchor {
            if let Some(dt_v) = elapsed(anchor.timestamp, curr.timestamp) {
                let raw_acceleration = (self.velocity - anchor.velocity) / dt_v;
                self.acceleration = ema(self.acceleration, raw_acceleration, self.acceleration_alpha);
            }
        }

        self.velocity_anchor = Some(VelocityAnchor {
            timestamp: curr.timestamp,
            velocity: self.velocity,
        });
        true
    }

    /// Tracking lost: drop the velocity anchor, keep the smoothed values
    pub fn lose(&mut self) {
        self.velocity_anchor = None;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn has_anchor(&self) -> bool {
        self.velocity_anchor.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::{Vec3, VELOCITY_SMOOTHING, ACCELERATION_SMOOTHING};

    fn at(t: f64, x: f32, y: f32) -> Sample {
        Sample::new(t, Vec3::new(x, y, 0.0))
    }

    fn estimator() -> MotionEstimator {
        MotionEstimator::new(VELOCITY_SMOOTHING, ACCELERATION_SMOOTHING)
    }

    #[test]
    fn test_velocity_in_pixels_per_second() {
        let mut m = estimator();
        let canvas = CanvasSize::new(640.0, 480.0);
        assert!(m.update(&at(0.0, 0.5, 0.5), &at(0.1, 0.6, 0.4), canvas));

        // raw = (64 px, -48 px) / 0.1 s, smoothed from zero with 0.30
        let v = m.velocity();
        assert!((v.x - 192.0).abs() < 1e-2);
        assert!((v.y + 144.0).abs() < 1e-2);
        // First velocity has no anchor to differentiate against
        assert_eq!(m.acceleration(), Vec2::zeros());
        assert!(m.has_anchor());
    }

    #[test]
    fn test_acceleration_from_smoothed_velocities() {
        let mut m = estimator();
        m.velocity_anchor = Some(VelocityAnchor { timestamp: 0.0, velocity: Vec2::zeros() });

        // Position delta chosen so the smoothed velocity lands on (100, 0)
        let canvas = CanvasSize::new(640.0, 480.0);
        let dx = (100.0 / VELOCITY_SMOOTHING) * 0.033 / 640.0;
        m.update(&at(0.0, 0.5, 0.5), &at(0.033, 0.5 + dx, 0.5), canvas);

        assert!((m.velocity().x - 100.0).abs() < 1e-2);
        // raw = 100 / 0.033 ≈ 3030.3, smoothed ≈ 1060.6
        assert!((m.acceleration().x - 1060.6).abs() < 0.5);
        assert!(m.acceleration().y.abs() < 1e-4);
    }

    #[test]
    fn test_non_positive_dt_skips_everything() {
        let mut m = estimator();
        let canvas = CanvasSize::new(640.0, 480.0);
        assert!(!m.update(&at(1.0, 0.0, 0.0), &at(1.0, 0.5, 0.5), canvas));
        assert!(!m.update(&at(1.0, 0.0, 0.0), &at(0.5, 0.5, 0.5), canvas));
        assert_eq!(m.velocity(), Vec2::zeros());
        assert!(!m.has_anchor());
    }

    #[test]
    fn test_lose_keeps_values() {
        let mut m = estimator();
        let canvas = CanvasSize::new(100.0, 100.0);
        m.update(&at(0.0, 0.0, 0.0), &at(0.1, 0.1, 0.0), canvas);
        m.update(&at(0.1, 0.1, 0.0), &at(0.2, 0.3, 0.0), canvas);
        let (v, a) = (m.velocity(), m.acceleration());

        m.lose();
        assert!(!m.has_anchor());
        assert_eq!(m.velocity(), v);
        assert_eq!(m.acceleration(), a);
    }
}
