//! Kinematics module - fingertip speed, velocity and acceleration estimation
//!
//! Re-exports only. All logic in submodules.

mod config;
mod sample;
mod smoothing;
mod frame_rate;
mod speed;
mod motion;
mod arrow;
mod estimator;

pub use config::{
    Channels, ConfigError, EstimatorConfig,
    FPS_SMOOTHING, VELOCITY_SMOOTHING, ACCELERATION_SMOOTHING,
};
pub use sample::{CanvasSize, Sample, Vec2, Vec3};
pub use smoothing::ema;
pub use frame_rate::FrameRateEstimator;
pub use speed::{SpeedChannel, ScreenSpeed};
pub use motion::MotionEstimator;
pub use arrow::{
    arrow_displacement, clamp_displacement, ArrowGeometry, ArrowKind,
    ARROW_WINDOW_SECS, MIN_ARROW_PX, MAX_ARROW_PX, ARROW_HEAD_ANGLE, ARROW_HEAD_PX,
};
pub use estimator::{ArrowReadout, FrameInput, KinematicEstimator, Readout, SpeedReadout};
