//! 3-D occupancy texture for a chunk

/// GPU-resident `dim x dim x dim` occupancy texture
///
/// Texel `(x, y, z)` carries the occupancy of the chunk cell at the same
/// coordinates, uploaded from the flat texel image in the chunk's linear
/// order. Sampling uses nearest filtering: linear would interpolate
/// occupancy across cell boundaries and leak neighboring voxels into the
/// carved faces.
pub struct ChunkTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    dim: u32,
}

impl ChunkTexture {
    /// Create the texture and its sampler; contents are uploaded separately
    pub fn new(device: &wgpu::Device, dim: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("chunk_occupancy_texture"),
            size: wgpu::Extent3d {
                width: dim,
                height: dim,
                depth_or_array_layers: dim,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("chunk_occupancy_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            dim,
        }
    }

    /// Upload a full `dim^3` texel image
    ///
    /// The texel at linear index `x + y*dim + z*dim*dim` lands at texture
    /// coordinate `(x, y, z)`. A row is `dim` one-byte texels, `dim` rows
    /// per depth slice. Occupancy changes re-upload the whole image before
    /// the next draw that reads it; there is no partial update.
    pub fn upload(&self, queue: &wgpu::Queue, texels: &[u8]) {
        debug_assert_eq!(texels.len(), (self.dim * self.dim * self.dim) as usize);

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            texels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.dim),
                rows_per_image: Some(self.dim),
            },
            wgpu::Extent3d {
                width: self.dim,
                height: self.dim,
                depth_or_array_layers: self.dim,
            },
        );
    }

    /// Get the texture view for binding
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Get the sampler for binding
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}
