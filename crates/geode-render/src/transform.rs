use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// View and projection matrices as uploaded to `@group(0) @binding(0)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

static_assertions::assert_eq_size!(TransformUniform, [u8; 128]);

impl TransformUniform {
    pub fn new(view: &Mat4, projection: &Mat4) -> Self {
        Self {
            model_view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::new(&Mat4::IDENTITY, &Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_matrices_are_column_major() {
        let view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniform = TransformUniform::new(&view, &Mat4::IDENTITY);
        assert_eq!(uniform.model_view[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.projection, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn test_projection_follows_view() {
        assert_eq!(std::mem::offset_of!(TransformUniform, projection), 64);
    }
}
