//! Homogeneous vector helpers and view/projection matrix construction for Geode.

mod matrix;
mod vector;

pub use matrix::{OrthoVolume, look_at, ortho};
pub use vector::{
    cross3, dot3, is_power_of_two, midpoint, mix, normalize_direction, spherical_to_cartesian,
};

/// Tolerance used when comparing unit-length quantities.
pub const UNIT_EPSILON: f32 = 1e-6;
