//! Tracking session - estimator lifecycle and per-frame JS entry point
//!
//! The session exists between `start` and `stop`. Frames pushed outside a
//! session are ignored. Channel configuration is staged and applied on the
//! next start.

use wasm_bindgen::prelude::*;
use js_sys::{Object, Reflect};
use std::cell::RefCell;
use crate::kinematics::{
    CanvasSize, Channels, ConfigError, EstimatorConfig, FrameInput, KinematicEstimator,
    Readout, SpeedReadout, Vec2,
};
use super::hand_landmarks::{self, parse_hand, Hand, LandmarkError, TRACKED_LANDMARK};

/// Minimum spacing between periodic frame logs
const LOG_INTERVAL_MS: f64 = 1000.0;

struct Session {
    estimator: KinematicEstimator,
    last_log_ms: f64,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = RefCell::new(None);
    static PENDING_CONFIG: RefCell<EstimatorConfig> = RefCell::new(EstimatorConfig::default());
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

// ============================================================================
// LIFECYCLE (called from lib.rs once collaborators are ready)
// ============================================================================

/// Begin a fresh session with zeroed state
pub fn start_session() {
    let config = PENDING_CONFIG.with(|c| *c.borrow());
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(Session {
            estimator: KinematicEstimator::new(config),
            last_log_ms: f64::NEG_INFINITY,
        });
    });
    hand_landmarks::store_hand(None);
    console_log!("▶️ Tracking session started ({:?})", config.channels);
}

/// Discard all session state
pub fn stop_session() {
    SESSION.with(|cell| cell.borrow_mut().take());
    hand_landmarks::store_hand(None);
    console_log!("⏹️ Tracking session stopped");
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Select estimator channels, applied on the next start
#[wasm_bindgen]
pub fn configure_channels(
    world_speed: bool,
    screen_speed: bool,
    velocity: bool,
    acceleration: bool,
) -> Result<(), JsValue> {
    stage_config(|config| {
        config.channels = Channels { screen_speed, world_speed, velocity, acceleration };
    })
}

/// Override smoothing weights, applied on the next start
#[wasm_bindgen]
pub fn set_smoothing(fps_alpha: f32, velocity_alpha: f32, acceleration_alpha: f32) -> Result<(), JsValue> {
    stage_config(|config| {
        config.fps_alpha = fps_alpha;
        config.velocity_alpha = velocity_alpha;
        config.acceleration_alpha = acceleration_alpha;
    })
}

fn stage_config(edit: impl FnOnce(&mut EstimatorConfig)) -> Result<(), JsValue> {
    let mut config = PENDING_CONFIG.with(|c| *c.borrow());
    edit(&mut config);
    config.validate()?;
    PENDING_CONFIG.with(|c| *c.borrow_mut() = config);
    Ok(())
}

/// Feed one detector result.
///
/// `screen` and `world` are flat 21×3 arrays for the first hand, or empty
/// when no hand was detected. `timestamp_ms` must be monotonic (performance.now()).
#[wasm_bindgen]
pub fn push_hand_frame(
    timestamp_ms: f64,
    screen: &[f32],
    world: &[f32],
    canvas_width: u32,
    canvas_height: u32,
) {
    let screen_hand = parse_or_warn(screen);
    let world_hand = parse_or_warn(world);

    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        let session = match slot.as_mut() {
            Some(s) => s,
            None => return,
        };

        let frame = frame_input(timestamp_ms, screen_hand.as_ref(), world_hand.as_ref(), canvas_width, canvas_height);
        let readout = session.estimator.update(&frame);

        if timestamp_ms - session.last_log_ms > LOG_INTERVAL_MS {
            log_frame(timestamp_ms, &frame, &readout, screen_hand.as_ref());
            session.last_log_ms = timestamp_ms;
        }
        hand_landmarks::store_hand(screen_hand);
    });
}

/// Zero the highscores of the running session
#[wasm_bindgen]
pub fn reset_highscore() {
    SESSION.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut() {
            session.estimator.reset_maxima();
        }
    });
}

#[wasm_bindgen]
pub fn is_running() -> bool {
    SESSION.with(|cell| cell.borrow().is_some())
}

/// Current readout as a plain JS object, `null` outside a session
#[wasm_bindgen]
pub fn get_readout() -> Result<JsValue, JsValue> {
    match current_readout() {
        Some(readout) => readout_to_js(&readout),
        None => Ok(JsValue::NULL),
    }
}

// ============================================================================
// INTERNAL API
// ============================================================================

pub fn current_readout() -> Option<Readout> {
    SESSION.with(|cell| cell.borrow().as_ref().map(|s| s.estimator.readout()))
}

/// Malformed input is treated as "no hand" so the estimator never bridges over it
fn parse_or_warn(flat: &[f32]) -> Option<Hand> {
    parse_hand(flat).unwrap_or_else(|err: LandmarkError| {
        web_sys::console::warn_1(&err.into());
        None
    })
}

fn frame_input(
    timestamp_ms: f64,
    screen: Option<&Hand>,
    world: Option<&Hand>,
    canvas_width: u32,
    canvas_height: u32,
) -> FrameInput {
    FrameInput {
        timestamp: timestamp_ms / 1000.0,
        screen: screen.map(|hand| hand[TRACKED_LANDMARK].position()),
        world: world.map(|hand| hand[TRACKED_LANDMARK].position()),
        canvas: CanvasSize::new(canvas_width as f32, canvas_height as f32),
    }
}

fn log_frame(timestamp_ms: f64, frame: &FrameInput, readout: &Readout, hand: Option<&Hand>) {
    let first = hand.map(|h| &h[..5]);
    console_log!(
        "[HandLandmarker] t={:.1} canvas={}x{} hand={} world={} fps={:.1} landmarks0={:?}",
        timestamp_ms,
        frame.canvas.width,
        frame.canvas.height,
        frame.screen.is_some(),
        frame.world.is_some(),
        readout.fps,
        first,
    );
}

fn readout_to_js(readout: &Readout) -> Result<JsValue, JsValue> {
    let out = Object::new();
    set(&out, "fps", JsValue::from_f64(readout.fps as f64))?;
    set(&out, "speed", speeds_to_js(&readout.speed)?)?;
    set(&out, "maxSpeed", speeds_to_js(&readout.max_speed)?)?;
    set(&out, "velocity2D", opt_vec2(readout.velocity, "vx", "vy")?)?;
    set(&out, "acceleration2D", opt_vec2(readout.acceleration, "ax", "ay")?)?;

    let arrows = Object::new();
    set(&arrows, "velocityDisplacement", opt_vec2(readout.arrows.velocity, "dx", "dy")?)?;
    set(&arrows, "accelerationDisplacement", opt_vec2(readout.arrows.acceleration, "dx", "dy")?)?;
    set(&out, "arrow", arrows.into())?;

    let tip = match readout.tip {
        Some(p) => {
            let obj = Object::new();
            set(&obj, "x", JsValue::from_f64(p.x as f64))?;
            set(&obj, "y", JsValue::from_f64(p.y as f64))?;
            set(&obj, "z", JsValue::from_f64(p.z as f64))?;
            obj.into()
        }
        None => JsValue::NULL,
    };
    set(&out, "tip", tip)?;
    set(&out, "visible", JsValue::from_bool(readout.visible))?;
    Ok(out.into())
}

fn speeds_to_js(speeds: &SpeedReadout) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    set(&obj, "norm", opt_f32(speeds.norm))?;
    set(&obj, "px", opt_f32(speeds.px))?;
    set(&obj, "mps", opt_f32(speeds.mps))?;
    Ok(obj.into())
}

fn opt_vec2(v: Option<Vec2>, x_key: &str, y_key: &str) -> Result<JsValue, JsValue> {
    match v {
        Some(v) => {
            let obj = Object::new();
            set(&obj, x_key, JsValue::from_f64(v.x as f64))?;
            set(&obj, y_key, JsValue::from_f64(v.y as f64))?;
            Ok(obj.into())
        }
        None => Ok(JsValue::UNDEFINED),
    }
}

fn opt_f32(v: Option<f32>) -> JsValue {
    v.map_or(JsValue::UNDEFINED, |x| JsValue::from_f64(x as f64))
}

fn set(target: &Object, key: &str, value: JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), &value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::HandLandmark;
    use crate::kinematics::Vec3;

    fn hand_with_tip(x: f32, y: f32, z: f32) -> Hand {
        let mut hand = [HandLandmark::default(); 21];
        hand[TRACKED_LANDMARK] = HandLandmark { x, y, z };
        hand
    }

    #[test]
    fn test_frame_input_picks_index_tip() {
        let screen = hand_with_tip(0.5, 0.25, -0.1);
        let world = hand_with_tip(0.01, 0.02, 0.03);
        let frame = frame_input(1500.0, Some(&screen), Some(&world), 640, 480);

        assert!((frame.timestamp - 1.5).abs() < 1e-12);
        assert_eq!(frame.screen, Some(Vec3::new(0.5, 0.25, -0.1)));
        assert_eq!(frame.world, Some(Vec3::new(0.01, 0.02, 0.03)));
        assert_eq!(frame.canvas, CanvasSize::new(640.0, 480.0));
    }

    #[test]
    fn test_frame_input_without_hand() {
        let frame = frame_input(33.0, None, None, 1280, 720);
        assert_eq!(frame.screen, None);
        assert_eq!(frame.world, None);
    }

    #[test]
    fn test_frames_drive_estimator_in_seconds() {
        let mut est = KinematicEstimator::default();
        let a = hand_with_tip(0.50, 0.50, 0.0);
        let b = hand_with_tip(0.54, 0.50, 0.0);
        est.update(&frame_input(0.0, Some(&a), None, 640, 480));
        let out = est.update(&frame_input(33.0, Some(&b), None, 640, 480));
        assert!((out.speed.px.unwrap() - 969.7).abs() < 0.5);
    }
}
