//! Orbit camera parameterized by spherical angles around a fixed target.

use geode_math::{OrthoVolume, look_at, ortho, spherical_to_cartesian};
use glam::{Mat4, Vec3};

/// Camera on a sphere of `radius` around `target`.
///
/// `theta` is the polar angle from +Z and `phi` the azimuth. Neither is
/// clamped; both wrap through `sin`/`cos`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub target: Vec3,
    pub up: Vec3,
    pub volume: OrthoVolume,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 1.5,
            theta: 0.0,
            phi: 0.0,
            target: Vec3::ZERO,
            up: Vec3::Y,
            volume: OrthoVolume::default(),
        }
    }
}

impl OrbitCamera {
    pub fn rotate_theta_by(&mut self, delta: f32) {
        self.theta += delta;
    }

    pub fn rotate_phi_by(&mut self, delta: f32) {
        self.phi += delta;
    }

    /// Eye position relative to the origin of the orbit.
    ///
    /// The target offsets the look-at point only; the eye is derived purely
    /// from the spherical parameters.
    pub fn eye(&self) -> Vec3 {
        spherical_to_cartesian(self.radius, self.theta, self.phi)
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye(), self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        ortho(&self.volume)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
