//! GPU mesh handle bundles

use bytemuck::{Pod, Zeroable};

use crate::core::types::Mat4;

/// Position-only vertex for the plain mesh render path
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
}

impl MeshVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![
        0 => Float32x3,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Uploaded vertex buffer plus the object's transform
///
/// Owns its GPU buffer; releasing the mesh releases the buffer. The
/// vertex data is a non-indexed triangle list.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    pub transform: Mat4,
}

impl GpuMesh {
    /// Upload tightly packed vertex data to a new buffer
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        contents: &[u8],
        vertex_count: u32,
    ) -> Self {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: contents.len() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&vertex_buffer, 0, contents);

        Self {
            vertex_buffer,
            vertex_count,
            transform: Mat4::IDENTITY,
        }
    }

    /// Get the vertex buffer
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    /// Number of vertices to draw
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
