//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const PLATFORM: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const PLATFORM_EDGE: [f32; 4] = [0.4, 0.26, 0.13, 1.0];
    pub const SKIN: [f32; 4] = [1.0, 0.85, 0.73, 1.0];
    pub const JEANS: [f32; 4] = [0.1, 0.1, 0.44, 1.0];
    pub const HAIR: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const PENDANT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const EYE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const AGENT_SUIT: [f32; 4] = [0.86, 0.08, 0.24, 1.0];
    pub const AGENT_TIE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const AGENT_BADGE: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const GOAL_WALL: [f32; 4] = [0.0, 0.59, 0.0, 1.0];
    pub const GOAL_DOOR: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const GOAL_WINDOW: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const GOAL_SIGN: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const TOUCH_BUTTON: [f32; 4] = [0.39, 0.39, 0.39, 0.7];
    pub const TOUCH_BUTTON_PRESSED: [f32; 4] = [0.59, 0.59, 0.59, 0.8];
    pub const TOUCH_BUTTON_EDGE: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const TOUCH_ARROW: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Player outfit palette, indexed by the level's outfit roll
    pub const OUTFITS: [[f32; 4]; 4] = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0, 1.0],
    ];
}
