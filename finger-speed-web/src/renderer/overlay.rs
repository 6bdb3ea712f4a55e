//! Overlay rendering - hand skeleton, tracked fingertip, velocity and acceleration arrows

use super::options::{self, RenderOptions};
use super::shapes::{Vertex, create_arrow_vertices, create_circle_vertices, create_line_vertices};
use super::state::{GPU_STATE, MAX_VERTICES};
use crate::bridge::{self, Hand, HAND_SKELETON, TRACKED_LANDMARK};
use crate::kinematics::{ArrowGeometry, CanvasSize, Readout, Vec2, Vec3};

/// Colors for different visualization elements
mod colors {
    /// Skeleton lines
    pub const CYAN: [f32; 4] = [0.23, 0.82, 1.0, 0.9];
    /// Landmark dots
    pub const SAND: [f32; 4] = [1.0, 0.88, 0.54, 1.0];
    /// Tracked fingertip ring
    pub const GREEN: [f32; 4] = [0.13, 0.82, 0.62, 1.0];
    /// Velocity arrow
    pub const YELLOW: [f32; 4] = [1.0, 0.9, 0.2, 1.0];
    /// Acceleration arrow
    pub const MAGENTA: [f32; 4] = [1.0, 0.3, 0.8, 1.0];
    /// Overlay sits on top of the video element
    pub const CLEAR: wgpu::Color = wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };
}

const LINE_WIDTH: f32 = 0.006;
const ARROW_WIDTH: f32 = 0.008;
const DOT_RADIUS: f32 = 0.012;
const TIP_RADIUS: f32 = 0.03;

/// Maps normalized and pixel coordinates to clip space for one frame
#[derive(Clone, Copy, Debug)]
struct Viewport {
    canvas: CanvasSize,
    mirror: bool,
}

impl Viewport {
    /// Normalized (0-1, y down) to clip space (-1 to 1, y up)
    fn normalized_to_clip(&self, p: Vec3) -> [f32; 2] {
        let x = if self.mirror { 1.0 - p.x } else { p.x };
        [x * 2.0 - 1.0, -(p.y * 2.0 - 1.0)]
    }

    fn pixel_to_clip(&self, p: Vec2) -> [f32; 2] {
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return [0.0, 0.0];
        }
        self.normalized_to_clip(Vec3::new(p.x / self.canvas.width, p.y / self.canvas.height, 0.0))
    }
}

fn build_skeleton_vertices(hand: &Hand, view: Viewport) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for (start_idx, end_idx) in HAND_SKELETON.iter() {
        let from = view.normalized_to_clip(hand[*start_idx].position());
        let to = view.normalized_to_clip(hand[*end_idx].position());
        vertices.extend(create_line_vertices(from, to, LINE_WIDTH, colors::CYAN));
    }
    for landmark in hand.iter() {
        let center = view.normalized_to_clip(landmark.position());
        vertices.extend(create_circle_vertices(center, DOT_RADIUS, colors::SAND, 8));
    }

    vertices
}

/// Fingertip marker plus arrows anchored at it
fn build_motion_vertices(readout: &Readout, tip: Vec3, view: Viewport, show_arrows: bool) -> Vec<Vertex> {
    let mut vertices = create_circle_vertices(view.normalized_to_clip(tip), TIP_RADIUS, colors::GREEN, 16);
    if !show_arrows {
        return vertices;
    }

    let origin = readout.canvas.to_pixels(tip);
    let arrows = [
        (readout.arrows.velocity, colors::YELLOW),
        (readout.arrows.acceleration, colors::MAGENTA),
    ];
    for (displacement, color) in arrows {
        if let Some(d) = displacement {
            let arrow = ArrowGeometry::new(origin, d);
            vertices.extend(create_arrow_vertices(&arrow, |p| view.pixel_to_clip(p), ARROW_WIDTH, color));
        }
    }

    vertices
}

/// All overlay geometry for one frame
fn build_overlay(readout: Option<&Readout>, hand: Option<&Hand>, options: RenderOptions) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let canvas = readout.map(|r| r.canvas).unwrap_or_default();
    let view = Viewport { canvas, mirror: options.mirror };

    if let (true, Some(hand)) = (options.show_skeleton, hand) {
        vertices.extend(build_skeleton_vertices(hand, view));
    }

    // Only while the point is on screen; frozen values stay on the HUD
    if let (Some(readout), Some(hand)) = (readout, hand) {
        if readout.visible {
            let tip = hand[TRACKED_LANDMARK].position();
            vertices.extend(build_motion_vertices(readout, tip, view, options.show_arrows));
        }
    }

    vertices.truncate(MAX_VERTICES);
    vertices
}

/// Render one frame of the overlay; clears to transparent when no session is running
pub fn render_frame() {
    let readout = bridge::current_readout();
    let hand = bridge::get_hand_landmarks();
    let vertices = build_overlay(readout.as_ref(), hand.as_ref(), options::current());

    GPU_STATE.with(|state_cell| {
        let mut state_ref = state_cell.borrow_mut();
        let state = match state_ref.as_mut() {
            Some(s) => s,
            None => return,
        };

        if let Some(r) = readout.as_ref() {
            state.resize(r.canvas.width as u32, r.canvas.height as u32);
        }

        let output = match state.surface.get_current_texture() {
            Ok(t) => t,
            Err(_) => return,
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = state.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("Overlay Encoder") }
        );

        if !vertices.is_empty() {
            state.queue.write_buffer(
                &state.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices),
            );
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !vertices.is_empty() {
                pass.set_pipeline(&state.render_pipeline);
                pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::HandLandmark;
    use crate::kinematics::{ArrowReadout, KinematicEstimator};

    fn hand_at(x: f32, y: f32) -> Hand {
        let mut hand = [HandLandmark::default(); 21];
        for (i, lm) in hand.iter_mut().enumerate() {
            *lm = HandLandmark { x: 0.1 + i as f32 * 0.03, y: 0.2 + i as f32 * 0.02, z: 0.0 };
        }
        hand[TRACKED_LANDMARK] = HandLandmark { x, y, z: 0.0 };
        hand
    }

    fn readout(visible: bool, arrows: ArrowReadout) -> Readout {
        let mut r = KinematicEstimator::default().readout();
        r.visible = visible;
        r.arrows = arrows;
        r.canvas = CanvasSize::new(640.0, 480.0);
        r
    }

    #[test]
    fn test_clip_space_corners() {
        let view = Viewport { canvas: CanvasSize::new(640.0, 480.0), mirror: false };
        assert_eq!(view.normalized_to_clip(Vec3::new(0.0, 0.0, 0.0)), [-1.0, 1.0]);
        assert_eq!(view.normalized_to_clip(Vec3::new(1.0, 1.0, 0.0)), [1.0, -1.0]);
        assert_eq!(view.pixel_to_clip(Vec2::new(320.0, 240.0)), [0.0, 0.0]);
    }

    #[test]
    fn test_mirror_flips_x_only() {
        let view = Viewport { canvas: CanvasSize::new(640.0, 480.0), mirror: true };
        assert_eq!(view.normalized_to_clip(Vec3::new(0.0, 0.0, 0.0)), [1.0, 1.0]);
        assert_eq!(view.pixel_to_clip(Vec2::new(640.0, 480.0)), [-1.0, -1.0]);
    }

    #[test]
    fn test_nothing_without_session() {
        let hand = hand_at(0.5, 0.5);
        let with_skeleton = build_overlay(None, Some(&hand), RenderOptions::default());
        // 21 bones + 21 dots, no fingertip marker
        assert_eq!(with_skeleton.len(), 21 * 6 + 21 * 8 * 3);
        assert!(build_overlay(None, None, RenderOptions::default()).is_empty());
    }

    #[test]
    fn test_arrows_follow_toggles() {
        let hand = hand_at(0.5, 0.5);
        let arrows = ArrowReadout {
            velocity: Some(Vec2::new(80.0, 0.0)),
            acceleration: Some(Vec2::new(0.0, -40.0)),
        };
        let r = readout(true, arrows);
        let no_skeleton = RenderOptions { show_skeleton: false, ..RenderOptions::default() };

        let full = build_overlay(Some(&r), Some(&hand), no_skeleton);
        assert_eq!(full.len(), 16 * 3 + 2 * 18);

        let hidden = RenderOptions { show_arrows: false, ..no_skeleton };
        assert_eq!(build_overlay(Some(&r), Some(&hand), hidden).len(), 16 * 3);
    }

    #[test]
    fn test_no_tip_marker_when_not_visible() {
        let hand = hand_at(0.5, 0.5);
        let r = readout(false, ArrowReadout::default());
        let no_skeleton = RenderOptions { show_skeleton: false, ..RenderOptions::default() };
        assert!(build_overlay(Some(&r), Some(&hand), no_skeleton).is_empty());
    }
}
