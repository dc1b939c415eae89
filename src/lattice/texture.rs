//! Chunk occupancy texture image building

use crate::voxel::OccupancyBitmask;

/// Expand an occupancy bitmask into a `dim^3` single-channel texel image
///
/// Texel `(x, y, z)` sits at linear index `x + y*dim + z*dim*dim` - the
/// same order as the chunk and its bitmask - and is 255 where the bit
/// is set, 0 otherwise. Any divergence from the chunk's linearization
/// would silently shade the wrong faces, so this stays a direct
/// bit-to-byte expansion.
pub fn build_occupancy_texels(mask: &OccupancyBitmask, dim: usize) -> Vec<u8> {
    let volume = dim * dim * dim;
    debug_assert_eq!(mask.len(), volume, "bitmask does not cover a {dim}^3 grid");

    (0..volume)
        .map(|i| if mask.get(i) { u8::MAX } else { 0 })
        .collect()
}
