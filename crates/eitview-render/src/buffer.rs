//! CPU scene buffers and GPU buffer helpers.

use eitview_core::{Mesh, Options};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::sink::RenderFrame;

/// Vertex and color data for one render pass.
///
/// Triangles are expanded to three vertices each (non-indexed), so every
/// triangle carries its own flat color. Node heights are written into the z
/// component of the positions by the mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBuffers {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    node_heights: Vec<f32>,
    electrode_positions: Vec<[f32; 3]>,
    electrode_colors: Vec<[f32; 3]>,
}

impl SceneBuffers {
    /// Lays out the buffers for a mesh, in render space with zero height.
    pub fn new(mesh: &Mesh, options: &Options) -> Self {
        let mut positions = Vec::with_capacity(mesh.num_triangles() * 3);
        for triangle in 0..mesh.num_triangles() {
            for node in mesh.triangle_nodes(triangle) {
                let p = mesh.to_render_space(node);
                positions.push([p.x, p.y, 0.0]);
            }
        }

        let mut electrode_positions = Vec::with_capacity(mesh.num_electrodes() * 2);
        let mut electrode_colors = Vec::with_capacity(mesh.num_electrodes() * 2);
        for (index, segment) in mesh.electrodes().iter().enumerate() {
            let color = if index == 0 && options.highlight_first_electrode {
                options.electrode_highlight_color
            } else {
                options.electrode_color
            };
            for end in segment {
                let p = mesh.to_render_space(*end);
                electrode_positions.push([p.x, p.y, 0.0]);
                electrode_colors.push(color.to_array());
            }
        }

        Self {
            colors: vec![[0.0; 3]; positions.len()],
            positions,
            node_heights: vec![0.0; mesh.num_nodes()],
            electrode_positions,
            electrode_colors,
        }
    }

    /// Per-vertex positions, three per triangle.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-vertex colors, parallel to [`Self::positions`].
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Interpolated height of each mesh node.
    pub fn node_heights(&self) -> &[f32] {
        &self.node_heights
    }

    /// Electrode segment end points, two per electrode.
    pub fn electrode_positions(&self) -> &[[f32; 3]] {
        &self.electrode_positions
    }

    /// Electrode colors, parallel to [`Self::electrode_positions`].
    pub fn electrode_colors(&self) -> &[[f32; 3]] {
        &self.electrode_colors
    }

    /// Color of one triangle.
    pub fn triangle_color(&self, triangle: usize) -> Vec3 {
        Vec3::from_array(self.colors[triangle * 3])
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut [[f32; 3]], &mut [[f32; 3]], &mut Vec<f32>) {
        (&mut self.positions, &mut self.colors, &mut self.node_heights)
    }

    /// Flat views of all buffers, ready for a [`crate::RenderSink`].
    pub fn frame(&self, transform: Mat4, background: Vec3) -> RenderFrame<'_> {
        RenderFrame {
            triangle_positions: bytemuck::cast_slice(&self.positions),
            triangle_colors: bytemuck::cast_slice(&self.colors),
            line_positions: bytemuck::cast_slice(&self.electrode_positions),
            line_colors: bytemuck::cast_slice(&self.electrode_colors),
            transform,
            background,
        }
    }
}

/// Creates a vertex buffer from data.
pub fn create_vertex_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &[T],
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}

/// Creates a uniform buffer from data.
pub fn create_uniform_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    data: &T,
    label: Option<&str>,
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label,
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Updates a buffer with new data.
pub fn update_buffer<T: bytemuck::Pod>(queue: &wgpu::Queue, buffer: &wgpu::Buffer, data: &[T]) {
    queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
}
