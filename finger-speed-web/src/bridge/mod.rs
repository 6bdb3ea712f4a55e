//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] session entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hand_landmarks;
mod session;

pub use hand_landmarks::{
    get_hand_landmarks,
    Hand,
    HandLandmark,
    HAND_SKELETON,
    TRACKED_LANDMARK,
};

pub use session::{
    // WASM entry points
    push_hand_frame,
    reset_highscore,
    configure_channels,
    set_smoothing,
    get_readout,
    is_running,
    // Internal API
    start_session,
    stop_session,
    current_readout,
};
