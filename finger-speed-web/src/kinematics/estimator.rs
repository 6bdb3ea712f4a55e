//! Kinematic estimator - one state transition per frame
//!
//! Owns every channel's anchors and smoothed values for one tracking session.
//! `update` is a total function: bad deltas skip, invisibility drops anchors,
//! derived values freeze at their last value.
//!
//! The estimator is a plain owned struct mutated through `&mut self`. Hosts that
//! deliver frames from more than one thread must serialize calls themselves;
//! the wasm bridge keeps it in a thread-local.

use super::arrow::{arrow_displacement, ArrowKind};
use super::config::EstimatorConfig;
use super::frame_rate::FrameRateEstimator;
use super::motion::MotionEstimator;
use super::sample::{CanvasSize, Sample, Vec2, Vec3};
use super::speed::{ScreenSpeed, SpeedChannel};

/// What the frame driver knows about the tracked point this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Monotonic seconds
    pub timestamp: f64,
    /// Normalized position (x/y in 0-1, z relative depth), `None` when not visible
    pub screen: Option<Vec3>,
    /// World position in meters, `None` when world landmarks are absent
    pub world: Option<Vec3>,
    pub canvas: CanvasSize,
}

/// Speed per coordinate space; `None` for disabled channels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpeedReadout {
    /// Normalized units per second
    pub norm: Option<f32>,
    /// Pixels per second
    pub px: Option<f32>,
    /// Meters per second
    pub mps: Option<f32>,
}

/// Arrow displacements in pixels, absent when too short to draw
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArrowReadout {
    pub velocity: Option<Vec2>,
    pub acceleration: Option<Vec2>,
}

/// Snapshot of every derived value, read by the renderer and HUD
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Readout {
    pub fps: f32,
    pub speed: SpeedReadout,
    pub max_speed: SpeedReadout,
    /// px/s
    pub velocity: Option<Vec2>,
    /// px/s²
    pub acceleration: Option<Vec2>,
    pub arrows: ArrowReadout,
    /// Last seen normalized position of the tracked point
    pub tip: Option<Vec3>,
    /// Tracked point visible in the latest frame
    pub visible: bool,
    pub canvas: CanvasSize,
}

/// Frame-rate, speed, velocity and acceleration for a single tracked point
pub struct KinematicEstimator {
    config: EstimatorConfig,
    /// Position anchor for frame rate and velocity
    last_sample: Option<Sample>,
    frame_rate: FrameRateEstimator,
    screen_speed: ScreenSpeed,
    world_speed: SpeedChannel,
    motion: MotionEstimator,
    tip: Option<Vec3>,
    visible: bool,
    canvas: CanvasSize,
}

impl KinematicEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            last_sample: None,
            frame_rate: FrameRateEstimator::new(config.fps_alpha),
            screen_speed: ScreenSpeed::new(),
            world_speed: SpeedChannel::new(),
            motion: MotionEstimator::new(config.velocity_alpha, config.acceleration_alpha),
            tip: None,
            visible: false,
            canvas: CanvasSize::default(),
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Advance by one frame and return the updated readout
    pub fn update(&mut self, frame: &FrameInput) -> Readout {
        self.canvas = frame.canvas;
        self.update_screen(frame);
        self.update_world(frame);
        self.readout()
    }

    fn update_screen(&mut self, frame: &FrameInput) {
        let position = match frame.screen {
            Some(position) => position,
            None => {
                self.visible = false;
                self.last_sample = None;
                self.screen_speed.lose();
                self.motion.lose();
                return;
            }
        };

        let sample = Sample::new(frame.timestamp, position);
        self.visible = true;
        self.tip = Some(position);

        let prev = self.last_sample;
        self.frame_rate.update(prev.and_then(|p| sample.dt_since(&p)));

        if self.config.channels.screen_speed {
            self.screen_speed.observe(sample, frame.canvas);
        }

        if self.config.tracks_velocity() {
            if let Some(prev) = prev {
                self.motion.update(&prev, &sample, frame.canvas);
            }
        }

        self.last_sample = Some(sample);
    }

    fn update_world(&mut self, frame: &FrameInput) {
        if !self.config.channels.world_speed {
            return;
        }
        match frame.world {
            Some(position) => {
                self.world_speed.observe(Sample::new(frame.timestamp, position));
            }
            None => self.world_speed.lose(),
        }
    }

    /// Zero the highscores only; smoothed values and anchors are untouched
    pub fn reset_maxima(&mut self) {
        self.screen_speed.reset_max();
        self.world_speed.reset_max();
    }

    pub fn readout(&self) -> Readout {
        let channels = self.config.channels;
        let screen = channels.screen_speed;
        let world = channels.world_speed;

        let speed = SpeedReadout {
            norm: screen.then(|| self.screen_speed.normalized().speed()),
            px: screen.then(|| self.screen_speed.px_speed()),
            mps: world.then(|| self.world_speed.speed()),
        };
        let max_speed = SpeedReadout {
            norm: screen.then(|| self.screen_speed.normalized().max_speed()),
            px: screen.then(|| self.screen_speed.max_px_speed()),
            mps: world.then(|| self.world_speed.max_speed()),
        };

        let velocity = channels.velocity.then(|| self.motion.velocity());
        let acceleration = channels.acceleration.then(|| self.motion.acceleration());
        let arrows = ArrowReadout {
            velocity: velocity.and_then(|v| arrow_displacement(v, ArrowKind::Velocity)),
            acceleration: acceleration.and_then(|a| arrow_displacement(a, ArrowKind::Acceleration)),
        };

        Readout {
            fps: self.frame_rate.fps(),
            speed,
            max_speed,
            velocity,
            acceleration,
            arrows,
            tip: self.tip,
            visible: self.visible,
            canvas: self.canvas,
        }
    }
}

impl Default for KinematicEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}
