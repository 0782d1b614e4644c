//! WebGPU render pipeline setup
//!
//! One pipeline, one vertex buffer. Each frame the scene is rebuilt from the
//! game state, mapped to NDC on the CPU and written into a buffer that only
//! grows.

use glam::Vec2;

use super::shapes::scene;
use super::vertex::{Vertex, colors};
use crate::input::{ControlState, ControlZones};
use crate::sim::GameState;

/// Map a world point (origin top-left, y down) to NDC (origin centre, y up)
#[inline]
pub fn world_to_ndc(world_size: Vec2, x: f32, y: f32) -> (f32, f32) {
    (x / world_size.x * 2.0 - 1.0, 1.0 - y / world_size.y * 2.0)
}

/// Smallest vertex count that fits `needed`, doubling from `current`
fn grown_capacity(current: u64, needed: u64) -> u64 {
    let mut capacity = current.max(MIN_VERTEX_CAPACITY);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

const MIN_VERTEX_CAPACITY: u64 = 2048;
const VERTEX_SIZE: u64 = std::mem::size_of::<Vertex>() as u64;

/// Vertex buffer reused across frames
struct VertexBuffer {
    buffer: wgpu::Buffer,
    /// In vertices
    capacity: u64,
    len: u32,
}

impl VertexBuffer {
    fn with_capacity(device: &wgpu::Device, capacity: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_vertices"),
            size: capacity * VERTEX_SIZE,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            capacity,
            len: 0,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        let needed = vertices.len() as u64;
        if needed > self.capacity {
            let capacity = grown_capacity(self.capacity, needed);
            log::debug!("Growing vertex buffer to {} vertices", capacity);
            *self = Self::with_capacity(device, capacity);
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        self.len = vertices.len() as u32;
    }
}

fn build_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("flat_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Triangle list, no culling: mirrored sprites flip winding
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn sky() -> wgpu::Color {
    let [r, g, b, a] = colors::SKY.map(f64::from);
    wgpu::Color { r, g, b, a }
}

/// GPU side of the game: surface, pipeline and scene buffer
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertices: VertexBuffer,
    /// Logical world size the scene is authored in
    world_size: Vec2,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        world_size: Vec2,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ledge-runner-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = build_pipeline(&device, format);
        let vertices = VertexBuffer::with_capacity(&device, MIN_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertices,
            world_size,
        })
    }

    /// Configure the surface again after it was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame of `state` plus the touch overlay
    pub fn draw_frame(
        &mut self,
        state: &GameState,
        controls: &ControlState,
        zones: &ControlZones,
        time_secs: f64,
    ) -> Result<(), wgpu::SurfaceError> {
        let world = self.world_size;
        let mut vertices = scene(state, controls, zones, time_secs);
        for v in &mut vertices {
            let (x, y) = world_to_ndc(world, v.position[0], v.position[1]);
            v.position = [x, y];
        }
        self.vertices.upload(&self.device, &self.queue, &vertices);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(sky()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
            pass.draw(0..self.vertices.len, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
