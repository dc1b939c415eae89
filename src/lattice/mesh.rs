//! Lattice shell mesh generation
//!
//! The lattice is a fixed-topology cube shell: for each of the six axis
//! directions it carries one full-size quad per depth layer, slatted
//! through the cube like a stack of window panes. Geometry depends only
//! on the lattice size, never on voxel occupancy - the fragment stage
//! samples a 3-D occupancy texture at each slat's `uvw` to decide which
//! cells to draw. Regenerating occupancy therefore never rebuilds this
//! mesh, only the texture.

use bytemuck::{Pod, Zeroable};

use crate::core::error::Error;
use crate::core::types::Result;

/// Vertices emitted per shell face (two triangles, non-indexed)
pub const VERTICES_PER_FACE: usize = 6;

/// Floats per vertex: 3 position + 3 texture lookup
pub const FLOATS_PER_VERTEX: usize = 6;

/// Nudge applied to a layer coordinate of exactly 1.0 so sampling stays
/// inside the texture instead of landing on its edge
const LAYER_EPSILON: f32 = 1e-6;

/// Single lattice vertex: object-space position plus the 3-D texture
/// coordinate selecting the depth slice this face samples
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LatticeVertex {
    pub position: [f32; 3],
    pub uvw: [f32; 3],
}

impl LatticeVertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// The six shell sweep directions, in emission order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceDir {
    NegZ,
    PosZ,
    NegX,
    PosX,
    NegY,
    PosY,
}

impl FaceDir {
    /// All directions in the order their faces appear in the buffer
    pub const ALL: [FaceDir; 6] = [
        FaceDir::NegZ,
        FaceDir::PosZ,
        FaceDir::NegX,
        FaceDir::PosX,
        FaceDir::NegY,
        FaceDir::PosY,
    ];
}

/// How one sweep direction places its shell faces
///
/// `swept` is the component driven by the layer index; `free` names the
/// two in-plane components. The six `corners` pick low/high values for
/// the free components, tracing the face's two triangles with the same
/// winding for every layer.
struct FaceOrientation {
    swept: usize,
    free: (usize, usize),
    /// Swept coordinate = (base + layer_index * step) * voxel_scale
    base: f32,
    step: f32,
    /// X sweeps count layers from the far texture slice downward
    flip_layer: bool,
    corners: [(usize, usize); 6],
}

impl FaceDir {
    fn orientation(self) -> FaceOrientation {
        match self {
            FaceDir::NegZ => FaceOrientation {
                swept: 2,
                free: (0, 1),
                base: 0.0,
                step: -1.0,
                flip_layer: false,
                corners: [(1, 1), (1, 0), (0, 0), (0, 0), (0, 1), (1, 1)],
            },
            FaceDir::PosZ => FaceOrientation {
                swept: 2,
                free: (0, 1),
                base: 1.0,
                step: -1.0,
                flip_layer: false,
                corners: [(0, 0), (1, 0), (1, 1), (1, 1), (0, 1), (0, 0)],
            },
            FaceDir::NegX => FaceOrientation {
                swept: 0,
                free: (1, 2),
                base: 1.0,
                step: 1.0,
                flip_layer: true,
                corners: [(0, 0), (0, 1), (1, 1), (1, 1), (1, 0), (0, 0)],
            },
            FaceDir::PosX => FaceOrientation {
                swept: 0,
                free: (1, 2),
                base: 0.0,
                step: 1.0,
                flip_layer: true,
                corners: [(1, 1), (0, 1), (0, 0), (0, 0), (1, 0), (1, 1)],
            },
            FaceDir::NegY => FaceOrientation {
                swept: 1,
                free: (0, 2),
                base: 0.0,
                step: 1.0,
                flip_layer: false,
                corners: [(1, 1), (1, 0), (0, 0), (0, 0), (0, 1), (1, 1)],
            },
            FaceDir::PosY => FaceOrientation {
                swept: 1,
                free: (0, 2),
                base: 1.0,
                step: 1.0,
                flip_layer: false,
                corners: [(0, 0), (1, 0), (1, 1), (1, 1), (0, 1), (0, 0)],
            },
        }
    }
}

/// Low/high object-space coordinate and texture coordinate for an
/// in-plane component
///
/// X and Y span `[0, extent]`; the Z span runs from `voxel_scale` back
/// to `voxel_scale - extent` because the shell extends into -Z. Texture
/// coordinates run against X (u = 1 at x = 0) and against Z.
fn corner_values(axis: usize, index: usize, size: u32, voxel_scale: f32) -> (f32, f32) {
    let extent = voxel_scale * size as f32;
    match (axis, index) {
        (0, 0) => (0.0, 1.0),
        (0, 1) => (extent, 0.0),
        (1, 0) => (0.0, 0.0),
        (1, 1) => (extent, 1.0),
        (2, 0) => (voxel_scale, 0.0),
        (2, 1) => (voxel_scale - extent, 1.0),
        _ => unreachable!("corner axis/index out of range"),
    }
}

/// Normalized depth-slice coordinate for layer `k` of `size`
///
/// The last slice (first, for flipped sweeps) is pulled just below 1.0
/// so it samples its own texel rather than the texture edge.
fn layer_fraction(k: u32, size: u32, flip: bool) -> f32 {
    let mut t = k as f32 / (size - 1) as f32;
    if flip {
        t = 1.0 - t;
    }
    if t >= 1.0 {
        t -= LAYER_EPSILON;
    }
    t
}

/// Generate the lattice shell vertex data
///
/// Emits `size` faces for each of the six sweep directions, 6 vertices
/// per face, so the result always holds exactly `size * 36` vertices
/// (`size * 216` floats). Fails for `size < 2`, where the layer
/// fraction would divide by zero.
pub fn build_lattice_mesh(size: u32, voxel_scale: f32) -> Result<Vec<LatticeVertex>> {
    if size < 2 {
        return Err(Error::Lattice(format!(
            "lattice size must be at least 2, got {size}"
        )));
    }

    let face_count = size as usize * FaceDir::ALL.len();
    let mut vertices = Vec::with_capacity(face_count * VERTICES_PER_FACE);

    for dir in FaceDir::ALL {
        let orient = dir.orientation();

        for k in 0..size {
            let layer = layer_fraction(k, size, orient.flip_layer);
            let swept_pos = (orient.base + k as f32 * orient.step) * voxel_scale;

            for &(ia, ib) in &orient.corners {
                let (a_pos, a_tex) = corner_values(orient.free.0, ia, size, voxel_scale);
                let (b_pos, b_tex) = corner_values(orient.free.1, ib, size, voxel_scale);

                let mut position = [0.0f32; 3];
                let mut uvw = [0.0f32; 3];
                position[orient.swept] = swept_pos;
                uvw[orient.swept] = layer;
                position[orient.free.0] = a_pos;
                uvw[orient.free.0] = a_tex;
                position[orient.free.1] = b_pos;
                uvw[orient.free.1] = b_tex;

                vertices.push(LatticeVertex { position, uvw });
            }
        }
    }

    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_count(vertices: &[LatticeVertex]) -> usize {
        vertices.len() * FLOATS_PER_VERTEX
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<LatticeVertex>(), 24);
        assert_eq!(
            LatticeVertex::desc().array_stride,
            (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64
        );
    }

    #[test]
    fn test_output_size() {
        for size in [2u32, 3, 8, 32] {
            let vertices = build_lattice_mesh(size, 0.1).unwrap();
            assert_eq!(vertices.len(), size as usize * 36);
            assert_eq!(float_count(&vertices), size as usize * 216);
        }
    }

    #[test]
    fn test_degenerate_size_rejected() {
        assert!(build_lattice_mesh(0, 0.1).is_err());
        assert!(build_lattice_mesh(1, 0.1).is_err());
        assert!(build_lattice_mesh(2, 0.1).is_ok());
    }

    #[test]
    fn test_layer_fractions_size_two() {
        let vertices = build_lattice_mesh(2, 1.0).unwrap();

        // First sweep (-Z): 12 vertices, layer lives in uvw.z
        let mut layers: Vec<f32> = vertices[..12].iter().map(|v| v.uvw[2]).collect();
        layers.dedup();
        assert_eq!(layers, vec![0.0, 1.0 - LAYER_EPSILON]);

        // Every layer coordinate stays inside [0, 1)
        for v in &vertices {
            for c in v.uvw {
                assert!((0.0..=1.0).contains(&c));
            }
        }
        for (dir_idx, dir) in FaceDir::ALL.iter().enumerate() {
            let swept = dir.orientation().swept;
            for v in &vertices[dir_idx * 12..(dir_idx + 1) * 12] {
                assert!(v.uvw[swept] < 1.0, "{:?} layer sampled at texture edge", dir);
            }
        }
    }

    #[test]
    fn test_first_face_matches_reference() {
        // size 4, scale 0.1: extent = 0.4. The first -Z face lies in the
        // z = 0 plane and winds (S,S) (S,0) (0,0) / (0,0) (0,S) (S,S)
        // with u mirrored against x.
        let vertices = build_lattice_mesh(4, 0.1).unwrap();
        let expect = [
            ([0.4, 0.4, 0.0], [0.0, 1.0, 0.0]),
            ([0.4, 0.0, 0.0], [0.0, 0.0, 0.0]),
            ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            ([0.0, 0.4, 0.0], [1.0, 1.0, 0.0]),
            ([0.4, 0.4, 0.0], [0.0, 1.0, 0.0]),
        ];

        for (v, (pos, uvw)) in vertices.iter().zip(expect) {
            for i in 0..3 {
                assert!((v.position[i] - pos[i]).abs() < 1e-6);
                assert!((v.uvw[i] - uvw[i]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_orientation_spot_checks() {
        // size 2, scale 1.0: extent = 2. One leading vertex per sweep block.
        let vertices = build_lattice_mesh(2, 1.0).unwrap();
        let eps = 1.0 - LAYER_EPSILON;
        let checks = [
            // (block start, position, uvw)
            (12, [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),  // +Z, layer 0 at z = scale
            (24, [1.0, 0.0, 1.0], [eps, 0.0, 0.0]),  // -X, k = 0 maps to far slice
            (36, [0.0, 2.0, -1.0], [eps, 1.0, 1.0]), // +X
            (48, [2.0, 0.0, -1.0], [0.0, 0.0, 1.0]), // -Y
            (60, [0.0, 1.0, 1.0], [1.0, 0.0, 0.0]),  // +Y
        ];

        for (start, pos, uvw) in checks {
            let v = &vertices[start];
            for i in 0..3 {
                assert!(
                    (v.position[i] - pos[i]).abs() < 1e-6,
                    "vertex {} position {:?}",
                    start,
                    v.position
                );
                assert!(
                    (v.uvw[i] - uvw[i]).abs() < 1e-6,
                    "vertex {} uvw {:?}",
                    start,
                    v.uvw
                );
            }
        }
    }

    #[test]
    fn test_faces_are_not_degenerate() {
        let vertices = build_lattice_mesh(3, 0.1).unwrap();

        for face in vertices.chunks(VERTICES_PER_FACE) {
            for tri in face.chunks(3) {
                let a = glam::Vec3::from(tri[0].position);
                let b = glam::Vec3::from(tri[1].position);
                let c = glam::Vec3::from(tri[2].position);
                let area = (b - a).cross(c - a).length() * 0.5;
                assert!(area > 1e-6, "degenerate triangle at {:?}", tri[0]);
            }
        }
    }
}
