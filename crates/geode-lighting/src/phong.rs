//! Precomputed light×material products and the Phong equation.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

use crate::source::{Light, Material};

/// Element-wise products of light and material colors, computed once at
/// setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingProducts {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub light_position: Vec4,
    pub shininess: f32,
}

impl LightingProducts {
    pub fn new(light: &Light, material: &Material) -> Self {
        Self {
            ambient: light.ambient * material.ambient,
            diffuse: light.diffuse * material.diffuse,
            specular: light.specular * material.specular,
            light_position: light.position,
            shininess: material.shininess,
        }
    }

    pub fn to_uniform(&self) -> PhongUniform {
        PhongUniform {
            ambient_product: self.ambient.to_array(),
            diffuse_product: self.diffuse.to_array(),
            specular_product: self.specular.to_array(),
            light_position: self.light_position.to_array(),
            shininess_padding: [self.shininess, 0.0, 0.0, 0.0],
        }
    }
}

impl Default for LightingProducts {
    fn default() -> Self {
        Self::new(&Light::default(), &Material::default())
    }
}

/// GPU-side lighting block, five `vec4<f32>`.
///
/// Bound at `@group(1) @binding(0)`, visible to `ShaderStages::FRAGMENT`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PhongUniform {
    pub ambient_product: [f32; 4],
    pub diffuse_product: [f32; 4],
    pub specular_product: [f32; 4],
    /// Eye-space light position; `w = 0` for a directional light.
    pub light_position: [f32; 4],
    /// x = shininess, yzw = padding.
    pub shininess_padding: [f32; 4],
}

static_assertions::assert_eq_size!(PhongUniform, [u8; 80]);

/// Evaluate the Phong equation for one eye-space surface point.
///
/// Mirrors `fs_main` in the sphere shader: Blinn half-vector specular,
/// suppressed when the surface faces away from the light. Alpha is 1.
pub fn shade_cpu(products: &LightingProducts, position: Vec3, normal: Vec3) -> Vec4 {
    let n = normal.try_normalize().unwrap_or(Vec3::Z);
    let light = products.light_position;
    let l = if light.w == 0.0 {
        light.truncate()
    } else {
        light.truncate() - position
    }
    .try_normalize()
    .unwrap_or(Vec3::Z);
    let e = (-position).try_normalize().unwrap_or(Vec3::Z);
    let h = (l + e).try_normalize().unwrap_or(n);

    let l_dot_n = l.dot(n);
    let kd = l_dot_n.max(0.0);
    let ks = if l_dot_n < 0.0 {
        0.0
    } else {
        n.dot(h).max(0.0).powf(products.shininess)
    };

    let color = products.ambient + products.diffuse * kd + products.specular * ks;
    color.truncate().extend(1.0)
}
