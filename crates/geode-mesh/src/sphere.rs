//! Recursive subdivision of a tetrahedron onto the unit sphere.

use geode_math::{midpoint, normalize_direction};
use glam::Vec4;
use tracing::debug;

use crate::vertex::SphereVertex;

/// Deepest subdivision level [`build_sphere`] will produce.
///
/// Depth 8 is 262 144 triangles; each further level quadruples that.
pub const MAX_SUBDIVISION_DEPTH: u32 = 8;

/// Number of triangles emitted for `depth`: `4 * 4^depth`.
pub fn triangle_count(depth: u32) -> usize {
    4usize.saturating_pow(depth.saturating_add(1))
}

/// Number of vertices emitted for `depth`. Vertices are not shared.
pub fn vertex_count(depth: u32) -> usize {
    triangle_count(depth).saturating_mul(3)
}

/// Four homogeneous points (`w = 1`) forming a regular tetrahedron inscribed
/// in the unit sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedTetrahedron {
    vertices: [Vec4; 4],
}

impl SeedTetrahedron {
    /// Seed from arbitrary points. Each is projected onto the unit sphere and
    /// given `w = 1`.
    pub fn new(vertices: [Vec4; 4]) -> Self {
        Self {
            vertices: vertices.map(|v| normalize_direction(Vec4::new(v.x, v.y, v.z, 1.0))),
        }
    }

    pub fn vertices(&self) -> &[Vec4; 4] {
        &self.vertices
    }

    /// The four faces in emission order: `(a,b,c)`, `(d,c,b)`, `(a,d,b)`,
    /// `(a,c,d)`.
    pub fn faces(&self) -> [[Vec4; 3]; 4] {
        let [a, b, c, d] = self.vertices;
        [[a, b, c], [d, c, b], [a, d, b], [a, c, d]]
    }
}

impl Default for SeedTetrahedron {
    fn default() -> Self {
        Self::new([
            Vec4::new(0.0, 0.0, -1.0, 1.0),
            Vec4::new(0.0, 0.942809, 0.333333, 1.0),
            Vec4::new(-0.816497, -0.471405, 0.333333, 1.0),
            Vec4::new(0.816497, -0.471405, 0.333333, 1.0),
        ])
    }
}

/// Parallel position and normal sequences for an unindexed triangle list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    positions: Vec<Vec4>,
    normals: Vec<Vec4>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
        }
    }

    /// Drop every vertex, keeping the allocations for the next build.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
    }

    pub fn positions(&self) -> &[Vec4] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec4] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate triangles as `[a, b, c]` position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        self.positions.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Interleave positions and normals for GPU upload.
    pub fn to_vertices(&self) -> Vec<SphereVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| SphereVertex::new(*p, *n))
            .collect()
    }

    fn push_triangle(&mut self, a: Vec4, b: Vec4, c: Vec4) {
        for p in [a, b, c] {
            self.positions.push(p);
            self.normals.push(Vec4::new(p.x, p.y, p.z, 0.0));
        }
    }
}

/// Build a sphere approximation by subdividing each seed face `depth` times.
///
/// `depth` is clamped to [`MAX_SUBDIVISION_DEPTH`]. Depth 0 returns the seed
/// tetrahedron itself.
pub fn build_sphere(seed: &SeedTetrahedron, depth: u32) -> MeshBuffer {
    let depth = depth.min(MAX_SUBDIVISION_DEPTH);
    let mut mesh = MeshBuffer::with_capacity(vertex_count(depth));
    build_into(seed, depth, &mut mesh);
    mesh
}

fn build_into(seed: &SeedTetrahedron, depth: u32, out: &mut MeshBuffer) {
    for [a, b, c] in seed.faces() {
        divide_triangle(a, b, c, depth, out);
    }
}

fn divide_triangle(a: Vec4, b: Vec4, c: Vec4, depth: u32, out: &mut MeshBuffer) {
    if depth == 0 {
        out.push_triangle(a, b, c);
        return;
    }

    let ab = normalize_direction(midpoint(a, b));
    let ac = normalize_direction(midpoint(a, c));
    let bc = normalize_direction(midpoint(b, c));

    divide_triangle(a, ab, ac, depth - 1, out);
    divide_triangle(ab, b, bc, depth - 1, out);
    divide_triangle(bc, c, ac, depth - 1, out);
    divide_triangle(ab, bc, ac, depth - 1, out);
}

/// Owns a seed and a reusable [`MeshBuffer`] that is rebuilt wholesale
/// whenever the subdivision depth changes.
#[derive(Debug)]
pub struct MeshBuilder {
    seed: SeedTetrahedron,
    mesh: MeshBuffer,
    depth: u32,
}

impl MeshBuilder {
    /// Create a builder and perform the initial build at `depth`.
    pub fn new(seed: SeedTetrahedron, depth: u32) -> Self {
        let mut builder = Self {
            seed,
            mesh: MeshBuffer::new(),
            depth: 0,
        };
        builder.rebuild(depth);
        builder
    }

    /// Reset the buffer to zero length and replay the full subdivision.
    pub fn rebuild(&mut self, depth: u32) -> &MeshBuffer {
        let depth = depth.min(MAX_SUBDIVISION_DEPTH);
        self.mesh.clear();
        self.mesh.positions.reserve(vertex_count(depth));
        self.mesh.normals.reserve(vertex_count(depth));
        build_into(&self.seed, depth, &mut self.mesh);
        self.depth = depth;
        debug!(
            depth,
            triangles = self.mesh.triangle_count(),
            "Rebuilt sphere mesh"
        );
        &self.mesh
    }

    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}
