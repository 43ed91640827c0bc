//! GPU vertex format for sphere meshes.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x4 | position |
//! | 1        | 16     | Float32x4 | normal   |

use std::mem;

use glam::Vec4;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

/// One interleaved vertex: homogeneous position (`w = 1`) and direction
/// normal (`w = 0`).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
}

static_assertions::assert_eq_size!(SphereVertex, [u8; 32]);

impl SphereVertex {
    pub fn new(position: Vec4, normal: Vec4) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

pub const SPHERE_VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: 16,
        shader_location: 1,
    },
];

/// Buffer layout shared by every pipeline that draws [`SphereVertex`] data.
pub const SPHERE_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<SphereVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &SPHERE_VERTEX_ATTRIBUTES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_matches_struct() {
        assert_eq!(SPHERE_VERTEX_LAYOUT.array_stride, 32);
        assert_eq!(SPHERE_VERTEX_LAYOUT.attributes.len(), 2);
    }

    #[test]
    fn test_attribute_offsets_cover_struct() {
        let last = SPHERE_VERTEX_ATTRIBUTES[1];
        assert_eq!(last.offset + last.format.size(), 32);
        assert_eq!(mem::offset_of!(SphereVertex, normal) as u64, last.offset);
    }

    #[test]
    fn test_bytes_are_position_then_normal() {
        let v = SphereVertex::new(Vec4::new(1.0, 2.0, 3.0, 1.0), Vec4::new(1.0, 2.0, 3.0, 0.0));
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 1.0, 2.0, 3.0, 0.0]);
    }
}
