//! Voxel data structures and occupancy encoding

pub mod voxel;
pub mod chunk;
pub mod bitmask;

pub use voxel::Voxel;
pub use chunk::{Chunk, CHUNK_DIM, CHUNK_VOLUME};
pub use bitmask::OccupancyBitmask;
