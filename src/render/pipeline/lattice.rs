//! Lattice shell render pipeline

use crate::lattice::LatticeVertex;
use crate::render::mesh::GpuMesh;
use crate::render::texture::ChunkTexture;

/// Pipeline drawing the lattice shell with texture-carved faces
///
/// The fragment stage samples the chunk's 3-D occupancy texture at each
/// slat's interpolated `uvw` and discards empty cells. Built from a
/// disk-loaded shader; when the shader failed validation the pipeline is
/// `None` and `render` clears the target without drawing.
pub struct LatticePipeline {
    pipeline: Option<wgpu::RenderPipeline>,
    texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl LatticePipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        frame_uniform_layout: &wgpu::BindGroupLayout,
        shader: Option<&wgpu::ShaderModule>,
    ) -> Self {
        // Bind group layout for the occupancy texture + sampler
        let texture_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lattice_texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D3,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = shader.map(|shader| {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("lattice_pipeline_layout"),
                bind_group_layouts: &[frame_uniform_layout, &texture_bind_group_layout],
                immediate_size: 0,
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("lattice_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[LatticeVertex::desc()],
                    compilation_options: Default::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // Shell slats are viewed from both sides
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
            log::warn!("Lattice pipeline disabled: shader module unavailable");
        }

        Self {
            pipeline,
            texture_bind_group_layout,
        }
    }

    /// Create bind group for a chunk's occupancy texture
    pub fn create_texture_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &ChunkTexture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lattice_texture_bind_group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        })
    }

    /// True when the shader compiled and draws will be issued
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Draw the lattice into `target`
    ///
    /// Clears to `clear_color` and issues one non-indexed triangle-list
    /// draw of the mesh's vertex count. Without a valid pipeline only the
    /// clear happens.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame_bind_group: &wgpu::BindGroup,
        texture_bind_group: &wgpu::BindGroup,
        mesh: &GpuMesh,
        clear_color: wgpu::Color,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lattice_pass"),
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
        pass.set_bind_group(1, texture_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
        pass.draw(0..mesh.vertex_count(), 0..1);
    }
}
