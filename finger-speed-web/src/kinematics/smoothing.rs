//! Exponential smoothing shared by every channel

use std::ops::{Add, Mul};

/// Exponential moving average step: `old * (1 - alpha) + raw * alpha`
///
/// Works for scalars and nalgebra vectors alike.
pub fn ema<T>(old: T, raw: T, alpha: f32) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    old * (1.0 - alpha) + raw * alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::Vec2;

    #[test]
    fn test_scalar_ema() {
        assert!((ema(0.0_f32, 40.0, 0.25) - 10.0).abs() < 1e-6);
        assert!((ema(10.0_f32, 10.0, 0.25) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_vector_ema() {
        let v = ema(Vec2::new(10.0, -10.0), Vec2::new(20.0, 0.0), 0.5);
        assert!((v.x - 15.0).abs() < 1e-6);
        assert!((v.y + 5.0).abs() < 1e-6);
    }
}
