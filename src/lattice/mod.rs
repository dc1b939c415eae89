//! Lattice shell mesh and chunk texture generation

pub mod mesh;
pub mod texture;

pub use mesh::{LatticeVertex, build_lattice_mesh};
pub use texture::build_occupancy_texels;
