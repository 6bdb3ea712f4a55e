//! Finger Speed Web - fingertip kinematics with a WebGPU overlay
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points for the session lifecycle and rendering
//!
//! JS runs the hand detector and camera, calls `start_tracking`, then
//! `push_hand_frame` once per video frame and `render_frame` once per
//! animation frame.

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}

pub mod kinematics;
mod bridge;
mod renderer;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    push_hand_frame, reset_highscore, configure_channels, set_smoothing, get_readout, is_running,
};
pub use renderer::{get_hud_text, set_mirror, set_show_arrows, set_show_skeleton};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Start a tracking session drawing onto the canvas with `canvas_id`.
///
/// Call after the camera and detector are ready. State is only zeroed once
/// the GPU is up, so a failed start leaves no half-initialized session.
#[wasm_bindgen]
pub async fn start_tracking(canvas_id: String) -> Result<(), JsValue> {
    if !renderer::is_initialized() {
        renderer::initialize_gpu(&canvas_id).await?;
        console_log!("✅ WebGPU initialized on #{}", canvas_id);
    }
    bridge::start_session();
    Ok(())
}

/// Stop tracking, discard session state and clear the overlay
#[wasm_bindgen]
pub fn stop_tracking() {
    bridge::stop_session();
    renderer::render_frame();
}

/// Render one frame with the current readout
#[wasm_bindgen]
pub fn render_frame() {
    renderer::render_frame();
}
