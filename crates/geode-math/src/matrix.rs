//! View and projection matrix construction.

use glam::{Mat4, Vec3};

/// A symmetric axis-aligned orthographic view volume in eye space.
///
/// `near` and `far` are signed distances along the view direction and may be
/// negative, so the volume can extend behind the eye.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoVolume {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoVolume {
    /// A volume spanning `±half_extent` on X and Y and `[near, far]` in depth.
    pub fn symmetric(half_extent: f32, near: f32, far: f32) -> Self {
        Self {
            left: -half_extent,
            right: half_extent,
            bottom: -half_extent,
            top: half_extent,
            near,
            far,
        }
    }
}

impl Default for OrthoVolume {
    fn default() -> Self {
        Self::symmetric(2.0, -10.0, 10.0)
    }
}

/// Right-handed orthographic projection mapping the volume to wgpu clip space
/// (`x, y` in `[-1, 1]`, depth in `[0, 1]` with `near` at 0).
pub fn ortho(volume: &OrthoVolume) -> Mat4 {
    Mat4::orthographic_rh(
        volume.left,
        volume.right,
        volume.bottom,
        volume.top,
        volume.near,
        volume.far,
    )
}

/// Right-handed view matrix looking from `eye` toward `target`.
///
/// When the view direction is parallel to `up` the basis is completed with an
/// arbitrary axis orthogonal to the view direction instead of collapsing to
/// NaN. A degenerate `eye == target` yields the identity.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let forward = target - eye;
    if forward.length_squared() <= f32::EPSILON {
        return Mat4::IDENTITY;
    }
    let forward = forward.normalize();
    let up = if forward.cross(up).length_squared() <= 1e-12 {
        forward.any_orthonormal_vector()
    } else {
        up
    };
    Mat4::look_to_rh(eye, forward, up)
}
