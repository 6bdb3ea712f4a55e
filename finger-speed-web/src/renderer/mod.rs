//! Renderer module - WebGPU overlay for the hand, fingertip and motion arrows
//!
//! Re-exports only. All logic in submodules.

mod state;
mod shapes;
mod options;
mod overlay;
mod hud;

pub use state::{initialize_gpu, is_initialized};
pub use options::{set_mirror, set_show_arrows, set_show_skeleton};
pub use overlay::render_frame;
pub use hud::get_hud_text;
