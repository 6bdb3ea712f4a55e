//! Frame-rate estimate from consecutive visible samples

use super::smoothing::ema;

/// Smoothed frames-per-second, best effort display metric
#[derive(Clone, Debug)]
pub struct FrameRateEstimator {
    fps: f32,
    alpha: f32,
}

impl FrameRateEstimator {
    pub fn new(alpha: f32) -> Self {
        Self { fps: 0.0, alpha }
    }

    /// Fold in one frame interval. `None` (no previous sample, or `dt <= 0`) keeps the estimate.
    pub fn update(&mut self, dt: Option<f32>) -> f32 {
        if let Some(dt) = dt {
            self.fps = ema(self.fps, 1.0 / dt, self.alpha);
        }
        self.fps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_interval() {
        let mut est = FrameRateEstimator::new(0.25);
        // 1/0.02 = 50 fps, weighted by 0.25 from zero
        let fps = est.update(Some(0.02));
        assert!((fps - 12.5).abs() < 1e-3);
    }

    #[test]
    fn test_converges_to_steady_rate() {
        let mut est = FrameRateEstimator::new(0.25);
        for _ in 0..100 {
            est.update(Some(1.0 / 30.0));
        }
        assert!((est.fps() - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_missing_dt_freezes() {
        let mut est = FrameRateEstimator::new(0.25);
        est.update(Some(0.05));
        let before = est.fps();
        assert_eq!(est.update(None), before);
    }
}
