//! Raw light and material colors.

use glam::Vec4;

/// One light source.
///
/// `position.w == 0` makes the light directional: `xyz` is then the direction
/// toward the light rather than a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec4,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec4::new(1.0, 1.0, 1.0, 0.0),
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
        }
    }
}

/// Surface reflectance colors and specular exponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        // Magenta ambient, orange diffuse, pinkish highlight.
        Self {
            ambient: Vec4::new(1.0, 0.0, 1.0, 1.0),
            diffuse: Vec4::new(1.0, 0.8, 0.0, 1.0),
            specular: Vec4::new(1.0, 0.8, 1.0, 1.0),
            shininess: 100.0,
        }
    }
}
