//! Rendering system and GPU interfaces

pub mod context;
pub mod shader;
pub mod buffer;
pub mod texture;
pub mod pipeline;
pub mod mesh;

pub use context::GpuContext;
pub use mesh::{GpuMesh, MeshVertex};
