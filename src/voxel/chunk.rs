//! Fixed-size voxel chunk

use crate::voxel::Voxel;

/// Number of voxels per chunk side
pub const CHUNK_DIM: usize = 32;

/// Total voxels in a chunk
pub const CHUNK_VOLUME: usize = CHUNK_DIM * CHUNK_DIM * CHUNK_DIM;

/// A fixed 32x32x32 voxel grid, linearized as `x + y*DIM + z*DIM*DIM`
///
/// Chunks are populated once and then only read; regenerating derived
/// data (occupancy bitmask, chunk texture) is a whole-chunk operation.
pub struct Chunk {
    voxels: Vec<Voxel>,
}

impl Chunk {
    /// Create a chunk with every cell empty
    pub fn new() -> Self {
        Self {
            voxels: vec![Voxel::EMPTY; CHUNK_VOLUME],
        }
    }

    /// Create a chunk by evaluating `f` at every linear index
    pub fn from_fn(mut f: impl FnMut(usize) -> Voxel) -> Self {
        Self {
            voxels: (0..CHUNK_VOLUME).map(|i| f(i)).collect(),
        }
    }

    /// Flat index for a cell position
    ///
    /// All of x, y, z must be in `[0, CHUNK_DIM)`.
    #[inline]
    pub fn linear_index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < CHUNK_DIM && y < CHUNK_DIM && z < CHUNK_DIM);
        x + y * CHUNK_DIM + z * CHUNK_DIM * CHUNK_DIM
    }

    /// Cell position for a flat index
    #[inline]
    pub fn position_of(index: usize) -> (usize, usize, usize) {
        debug_assert!(index < CHUNK_VOLUME);
        (
            index % CHUNK_DIM,
            (index / CHUNK_DIM) % CHUNK_DIM,
            index / (CHUNK_DIM * CHUNK_DIM),
        )
    }

    /// Get the voxel at a cell position
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.voxels[Self::linear_index(x, y, z)]
    }

    /// Iterate voxels in linear order
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.iter()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_index_order() {
        assert_eq!(Chunk::linear_index(0, 0, 0), 0);
        assert_eq!(Chunk::linear_index(1, 0, 0), 1);
        assert_eq!(Chunk::linear_index(0, 1, 0), CHUNK_DIM);
        assert_eq!(Chunk::linear_index(0, 0, 1), CHUNK_DIM * CHUNK_DIM);
        assert_eq!(
            Chunk::linear_index(CHUNK_DIM - 1, CHUNK_DIM - 1, CHUNK_DIM - 1),
            CHUNK_VOLUME - 1
        );
    }

    #[test]
    fn test_index_position_round_trip() {
        for index in [0, 1, 31, 32, 1023, 1024, CHUNK_VOLUME - 1] {
            let (x, y, z) = Chunk::position_of(index);
            assert_eq!(Chunk::linear_index(x, y, z), index);
        }
    }

    #[test]
    fn test_from_fn_population() {
        let chunk = Chunk::from_fn(|i| {
            if i % 2 == 0 {
                Voxel::new(1)
            } else {
                Voxel::EMPTY
            }
        });

        assert!(chunk.get(0, 0, 0).is_solid());
        assert!(!chunk.get(1, 0, 0).is_solid());
        assert!(chunk.get(2, 0, 0).is_solid());
        // Index 32 (0,1,0) is even
        assert!(chunk.get(0, 1, 0).is_solid());
    }

    #[test]
    fn test_new_is_empty() {
        let chunk = Chunk::new();
        assert!(chunk.iter().all(|v| !v.is_solid()));
    }
}
