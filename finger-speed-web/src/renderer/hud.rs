//! HUD text for the page overlay
//!
//! JS copies the text into an HTML element each frame, like the debug overlay.

use wasm_bindgen::prelude::*;
use std::fmt::Write;
use crate::bridge;
use crate::kinematics::Readout;

/// Format the readout; disabled channels are left out
pub fn format_hud(readout: &Readout) -> String {
    let mut text = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(text, "FPS: {:.1}", readout.fps);

    if let (Some(speed), Some(max)) = (readout.speed.mps, readout.max_speed.mps) {
        let _ = writeln!(text, "Speed (m/s): {:.3}", speed);
        let _ = writeln!(text, "Max (m/s): {:.3}", max);
    }
    if let (Some(speed), Some(max)) = (readout.speed.px, readout.max_speed.px) {
        let _ = writeln!(text, "Speed (px/s): {:.0}", speed);
        let _ = writeln!(text, "Max (px/s): {:.0}", max);
    }
    if let Some(v) = readout.velocity {
        let _ = writeln!(text, "|v| (px/s): {:.0}", v.norm());
    }
    if let Some(a) = readout.acceleration {
        let _ = writeln!(text, "|a| (px/s²): {:.0}", a.norm());
    }
    if let Some(tip) = readout.tip {
        let _ = writeln!(text, "Index (x,y,z): {:.3}, {:.3}, {:.3}", tip.x, tip.y, tip.z);
    }

    text.truncate(text.trim_end().len());
    text
}

/// Get formatted HUD text (called from JS to update HTML)
#[wasm_bindgen]
pub fn get_hud_text() -> String {
    bridge::current_readout()
        .map(|readout| format_hud(&readout))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::{
        CanvasSize, EstimatorConfig, FrameInput, KinematicEstimator, Vec3,
    };

    fn two_frames(config: EstimatorConfig) -> Readout {
        let mut est = KinematicEstimator::new(config);
        let canvas = CanvasSize::new(640.0, 480.0);
        est.update(&FrameInput {
            timestamp: 0.0,
            screen: Some(Vec3::new(0.50, 0.50, 0.0)),
            world: Some(Vec3::new(0.0, 0.0, 0.0)),
            canvas,
        });
        est.update(&FrameInput {
            timestamp: 0.5,
            screen: Some(Vec3::new(0.54, 0.50, 0.0)),
            world: Some(Vec3::new(0.1, 0.0, 0.0)),
            canvas,
        })
    }

    #[test]
    fn test_world_only_hud() {
        let text = format_hud(&two_frames(EstimatorConfig::world_speed_only()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "FPS: 0.5",
            "Speed (m/s): 0.200",
            "Max (m/s): 0.200",
            "Index (x,y,z): 0.540, 0.500, 0.000",
        ]);
    }

    #[test]
    fn test_full_hud_lists_every_channel() {
        let text = format_hud(&two_frames(EstimatorConfig::full()));
        assert!(text.contains("Speed (px/s): 64"));
        assert!(text.contains("|v| (px/s): "));
        assert!(text.contains("|a| (px/s²): "));
        assert!(!text.ends_with('\n'));
    }
}
