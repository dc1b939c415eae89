//! GPU texture resources

pub mod chunk_texture;

pub use chunk_texture::ChunkTexture;
