//! Estimator configuration - smoothing constants and enabled channels

use std::fmt;

/// EMA weight for the frame-rate estimate
pub const FPS_SMOOTHING: f32 = 0.25;

/// EMA weight for the 2D pixel velocity
pub const VELOCITY_SMOOTHING: f32 = 0.30;

/// EMA weight for the 2D pixel acceleration
pub const ACCELERATION_SMOOTHING: f32 = 0.35;

/// Which derived quantities the estimator computes and reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Channels {
    /// Speed in normalized units/s and px/s from screen landmarks
    pub screen_speed: bool,
    /// Speed in m/s from world landmarks
    pub world_speed: bool,
    /// Smoothed 2D velocity in px/s
    pub velocity: bool,
    /// Smoothed 2D acceleration in px/s²
    pub acceleration: bool,
}

impl Channels {
    pub const ALL: Channels = Channels {
        screen_speed: true,
        world_speed: true,
        velocity: true,
        acceleration: true,
    };
}

impl Default for Channels {
    fn default() -> Self {
        Self::ALL
    }
}

/// Errors from an invalid estimator configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Smoothing weight must lie strictly between 0 and 1
    SmoothingOutOfRange { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SmoothingOutOfRange { name, value } => {
                write!(f, "{} must be in (0, 1), got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration for [`KinematicEstimator`](super::KinematicEstimator)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EstimatorConfig {
    pub channels: Channels,
    pub fps_alpha: f32,
    pub velocity_alpha: f32,
    pub acceleration_alpha: f32,
}

impl EstimatorConfig {
    /// Every channel enabled: screen + world speed, velocity, acceleration
    pub fn full() -> Self {
        Self {
            channels: Channels::ALL,
            fps_alpha: FPS_SMOOTHING,
            velocity_alpha: VELOCITY_SMOOTHING,
            acceleration_alpha: ACCELERATION_SMOOTHING,
        }
    }

    /// World-space speed (m/s) only
    pub fn world_speed_only() -> Self {
        Self::with_channels(Channels {
            screen_speed: false,
            world_speed: true,
            velocity: false,
            acceleration: false,
        })
    }

    /// Screen-space speed (normalized and px/s) only
    pub fn screen_speed_only() -> Self {
        Self::with_channels(Channels {
            screen_speed: true,
            world_speed: false,
            velocity: false,
            acceleration: false,
        })
    }

    pub fn with_channels(channels: Channels) -> Self {
        Self { channels, ..Self::full() }
    }

    /// Acceleration is differentiated from the smoothed velocity, so it drags velocity along
    pub fn tracks_velocity(&self) -> bool {
        self.channels.velocity || self.channels.acceleration
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("fps_alpha", self.fps_alpha),
            ("velocity_alpha", self.velocity_alpha),
            ("acceleration_alpha", self.acceleration_alpha),
        ];
        for (name, value) in weights {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::SmoothingOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::full()
    }
}
