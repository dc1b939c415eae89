//! Per-frame matrix uniforms

use bytemuck::{Pod, Zeroable};

use crate::core::camera::Camera;
use crate::core::types::Mat4;

/// Per-frame uniform data for GPU (must match shader struct exactly)
///
/// Three column-major 4x4 matrices: projection, view, and the drawn
/// object's model transform.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Projection matrix (64 bytes, offset 0)
    pub proj: [[f32; 4]; 4],
    /// View matrix (64 bytes, offset 64)
    pub view: [[f32; 4]; 4],
    /// Model matrix (64 bytes, offset 128)
    pub model: [[f32; 4]; 4],
}

impl FrameUniforms {
    /// Build uniform data from a camera and an object transform
    pub fn from_camera(camera: &Camera, model: Mat4) -> Self {
        Self {
            proj: camera.projection_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

/// GPU buffer for the per-frame uniforms
pub struct FrameUniformBuffer {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl FrameUniformBuffer {
    /// Create new frame uniform buffer
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Upload this frame's matrices
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera, model: Mat4) {
        let uniforms = FrameUniforms::from_camera(camera, model);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Get bind group layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Get bind group
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    #[test]
    fn test_uniform_size() {
        // Must be exactly 192 bytes to match the WGSL struct layout
        let size = std::mem::size_of::<FrameUniforms>();
        assert_eq!(size, 192, "FrameUniforms must be exactly 192 bytes, got {} bytes", size);
    }

    #[test]
    fn test_from_camera() {
        let camera = Camera::default();
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0));
        let uniforms = FrameUniforms::from_camera(&camera, model);

        assert_eq!(uniforms.proj, camera.projection_matrix().to_cols_array_2d());
        assert_eq!(uniforms.view, camera.view_matrix().to_cols_array_2d());
        // Column-major: the translation sits in the fourth column
        assert_eq!(uniforms.model[3], [0.0, 0.0, 1.0, 1.0]);
    }
}
