//! Shape primitives - clip-space vertices for dots, lines and arrows

use crate::kinematics::{ArrowGeometry, Vec2};

/// Vertex structure for rendering colored shapes
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x4
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Filled circle as a triangle fan unrolled into a triangle list
pub fn create_circle_vertices(
    center: [f32; 2],
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let rim = |i: u32| {
        let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
        Vertex {
            position: [center[0] + radius * angle.cos(), center[1] + radius * angle.sin()],
            color,
        }
    };

    (0..segments)
        .flat_map(|i| [Vertex { position: center, color }, rim(i), rim(i + 1)])
        .collect()
}

/// Line segment as a thin quad (two triangles)
pub fn create_line_vertices(
    from: [f32; 2],
    to: [f32; 2],
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let len = (dx * dx + dy * dy).sqrt();

    if len < 0.001 { return vec![]; }

    // Perpendicular offset for line thickness
    let px = -dy / len * width;
    let py = dx / len * width;
    let v = |x: f32, y: f32| Vertex { position: [x, y], color };

    vec![
        v(from[0] - px, from[1] - py),
        v(from[0] + px, from[1] + py),
        v(to[0] + px, to[1] + py),

        v(from[0] - px, from[1] - py),
        v(to[0] + px, to[1] + py),
        v(to[0] - px, to[1] - py),
    ]
}

/// Shaft and head strokes of an arrow, mapped from pixel space by `to_clip`
pub fn create_arrow_vertices(
    arrow: &ArrowGeometry,
    to_clip: impl Fn(Vec2) -> [f32; 2],
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    arrow
        .segments()
        .iter()
        .flat_map(|(a, b)| create_line_vertices(to_clip(*a), to_clip(*b), width, color))
        .collect()
}
