//! Render pipelines

pub mod lattice;
pub mod mesh;

pub use lattice::LatticePipeline;
pub use mesh::MeshPipeline;
