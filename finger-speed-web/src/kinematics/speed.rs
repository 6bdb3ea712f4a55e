//! Speed channels - distance over time against a per-space anchor
//!
//! Each channel keeps its own anchor so screen and world speed never share
//! a delta. Speed and highscore freeze on tracking loss; only the anchor is dropped.

use super::sample::{CanvasSize, Sample};

/// Speed in a single coordinate space with running maximum
#[derive(Clone, Debug, Default)]
pub struct SpeedChannel {
    anchor: Option<Sample>,
    speed: f32,
    max_speed: f32,
}

impl SpeedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a visible sample. Returns the freshly computed speed, if any.
    ///
    /// The anchor advances even when `dt <= 0` so one duplicate timestamp
    /// does not stall later deltas.
    pub fn observe(&mut self, sample: Sample) -> Option<f32> {
        let fresh = self.anchor.and_then(|prev| {
            let dt = sample.dt_since(&prev)?;
            Some((sample.position - prev.position).norm() / dt)
        });

        if let Some(speed) = fresh {
            self.speed = speed;
            self.max_speed = self.max_speed.max(speed);
        }
        self.anchor = Some(sample);
        fresh
    }

    /// Point not visible in this space: never bridge the gap
    pub fn lose(&mut self) {
        self.anchor = None;
    }

    pub fn reset_max(&mut self) {
        self.max_speed = 0.0;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Screen-space speed reported both in normalized units/s and px/s
///
/// Pixel speed scales each fresh normalized speed by the canvas diagonal at
/// that frame, and keeps its own highscore since the canvas may be resized.
#[derive(Clone, Debug, Default)]
pub struct ScreenSpeed {
    normalized: SpeedChannel,
    px_speed: f32,
    max_px_speed: f32,
}

impl ScreenSpeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, sample: Sample, canvas: CanvasSize) -> Option<f32> {
        let norm = self.normalized.observe(sample)?;
        let px = norm * canvas.diagonal();
        self.px_speed = px;
        self.max_px_speed = self.max_px_speed.max(px);
        Some(norm)
    }

    pub fn lose(&mut self) {
        self.normalized.lose();
    }

    pub fn reset_max(&mut self) {
        self.normalized.reset_max();
        self.max_px_speed = 0.0;
    }

    pub fn normalized(&self) -> &SpeedChannel {
        &self.normalized
    }

    pub fn px_speed(&self) -> f32 {
        self.px_speed
    }

    pub fn max_px_speed(&self) -> f32 {
        self.max_px_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::Vec3;

    fn at(t: f64, x: f32, y: f32, z: f32) -> Sample {
        Sample::new(t, Vec3::new(x, y, z))
    }

    #[test]
    fn test_first_sample_only_anchors() {
        let mut ch = SpeedChannel::new();
        assert_eq!(ch.observe(at(0.0, 0.5, 0.5, 0.0)), None);
        assert!(ch.has_anchor());
        assert_eq!(ch.speed(), 0.0);
    }

    #[test]
    fn test_three_dimensional_distance() {
        let mut ch = SpeedChannel::new();
        ch.observe(at(0.0, 0.0, 0.0, 0.0));
        // 3-4-12 triangle: |d| = 13 over 0.5 s
        let speed = ch.observe(at(0.5, 3.0, 4.0, 12.0)).unwrap();
        assert!((speed - 26.0).abs() < 1e-4);
        assert_eq!(ch.max_speed(), speed);
    }

    #[test]
    fn test_zero_dt_skips_but_advances_anchor() {
        let mut ch = SpeedChannel::new();
        ch.observe(at(0.0, 0.0, 0.0, 0.0));
        ch.observe(at(0.1, 0.1, 0.0, 0.0));
        let frozen = ch.speed();

        assert_eq!(ch.observe(at(0.1, 0.9, 0.0, 0.0)), None);
        assert_eq!(ch.speed(), frozen);

        // Delta now measured from the duplicate-timestamp sample at x=0.9
        let speed = ch.observe(at(0.2, 1.0, 0.0, 0.0)).unwrap();
        assert!((speed - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_loss_clears_anchor_and_freezes() {
        let mut ch = SpeedChannel::new();
        ch.observe(at(0.0, 0.0, 0.0, 0.0));
        ch.observe(at(1.0, 2.0, 0.0, 0.0));
        ch.lose();
        assert!(!ch.has_anchor());
        assert_eq!(ch.speed(), 2.0);
        assert_eq!(ch.max_speed(), 2.0);

        assert_eq!(ch.observe(at(2.0, 100.0, 0.0, 0.0)), None);
        assert_eq!(ch.speed(), 2.0);
    }

    #[test]
    fn test_max_only_resets_explicitly() {
        let mut ch = SpeedChannel::new();
        ch.observe(at(0.0, 0.0, 0.0, 0.0));
        ch.observe(at(1.0, 5.0, 0.0, 0.0));
        ch.observe(at(2.0, 6.0, 0.0, 0.0));
        assert_eq!(ch.speed(), 1.0);
        assert_eq!(ch.max_speed(), 5.0);

        ch.reset_max();
        assert_eq!(ch.max_speed(), 0.0);
        assert_eq!(ch.speed(), 1.0);
    }

    #[test]
    fn test_pixel_speed_uses_canvas_diagonal() {
        let mut screen = ScreenSpeed::new();
        let canvas = CanvasSize::new(640.0, 480.0);
        screen.observe(at(0.000, 0.50, 0.50, 0.0), canvas);
        let norm = screen.observe(at(0.033, 0.54, 0.50, 0.0), canvas).unwrap();

        assert!((norm - 1.2121).abs() < 1e-3);
        assert!((screen.px_speed() - 969.7).abs() < 0.5);
        assert_eq!(screen.max_px_speed(), screen.px_speed());
    }
}
