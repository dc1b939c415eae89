//! Plain mesh render pipeline

use crate::render::mesh::{GpuMesh, MeshVertex};

/// Pipeline for the simple position-only mesh path
///
/// Same fail-closed contract as the lattice pipeline: a shader that
/// failed validation leaves `pipeline` empty and `render` only clears.
pub struct MeshPipeline {
    pipeline: Option<wgpu::RenderPipeline>,
}

impl MeshPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        frame_uniform_layout: &wgpu::BindGroupLayout,
        shader: Option<&wgpu::ShaderModule>,
    ) -> Self {
        let pipeline = shader.map(|shader| {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("mesh_pipeline_layout"),
                bind_group_layouts: &[frame_uniform_layout],
                immediate_size: 0,
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("mesh_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[MeshVertex::desc()],
                    compilation_options: Default::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                multiview_mask: None,
                cache: None,
            })
        });

        if pipeline.is_none() {
            log::warn!("Mesh pipeline disabled: shader module unavailable");
        }

        Self { pipeline }
    }

    /// True when the shader compiled and draws will be issued
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Draw the mesh into `target`, clearing first
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame_bind_group: &wgpu::BindGroup,
        mesh: &GpuMesh,
        clear_color: wgpu::Color,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("mesh_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(pipeline) = &self.pipeline else { return };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, frame_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
        pass.draw(0..mesh.vertex_count(), 0..1);
    }
}
