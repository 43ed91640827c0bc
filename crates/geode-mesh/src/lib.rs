//! Tetrahedron-subdivision sphere meshes.
//!
//! [`build_sphere`] refines a [`SeedTetrahedron`] into a flat, unindexed
//! triangle list whose vertices all lie on the unit sphere. Positions and
//! normals are stored side by side in a [`MeshBuffer`]; triangle `i` occupies
//! elements `[3i, 3i + 3)` of both sequences.

pub mod obj;
mod sphere;
mod vertex;

pub use obj::{ObjExportError, export_obj, write_obj};
pub use sphere::{
    MAX_SUBDIVISION_DEPTH, MeshBuffer, MeshBuilder, SeedTetrahedron, build_sphere,
    triangle_count, vertex_count,
};
pub use vertex::{SPHERE_VERTEX_ATTRIBUTES, SPHERE_VERTEX_LAYOUT, SphereVertex};
